//! Sphere mesh generation pipeline
//!
//! Points are distributed on a Fibonacci spiral, projected stereographically
//! onto the plane, triangulated there, and the resulting disk is closed by
//! adding the projection pole back as the apex region.

mod delaunay;
mod fibonacci;
mod projection;

pub use delaunay::{HullTriangulator, Triangulation, Triangulator};
pub use fibonacci::{distribute, golden_angle, seeded_random_source, wrap_longitude, Coordinate, FibonacciSpiral};
pub use projection::{inverse_stereographic, stereographic_projection, to_cartesian, PROJECTION_POLE};

use glam::DVec3;

use crate::config::{SphereConfig, MIN_RESOLUTION};
use crate::error::{Result, SphereError};
use crate::mesh::{close_mesh, SphereMesh};

/// Output of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedSphere {
    /// Distributed points in generation order
    pub coordinates: Vec<Coordinate>,
    /// Unit position of every region of `mesh`; when closure added an apex it
    /// is the last entry, at the pole
    pub region_positions: Vec<DVec3>,
    /// Closed half-edge mesh over all regions
    pub mesh: SphereMesh,
}

/// Generate a closed sphere mesh with a custom triangulation service
///
/// # Errors
///
/// Returns `InvalidTesselation` if `config.resolution` is below 4, and
/// propagates projection, triangulation and closure errors.
pub fn generate_sphere<T: Triangulator>(config: &SphereConfig, triangulator: &T) -> Result<GeneratedSphere> {
    if config.resolution < MIN_RESOLUTION {
        return Err(SphereError::InvalidTesselation {
            resolution: config.resolution,
            minimum: MIN_RESOLUTION,
        });
    }

    // Step 1: Distribute points on the spiral
    let coordinates: Vec<Coordinate> =
        distribute(config.resolution, config.jitter, seeded_random_source(config.seed))?.collect();

    // Step 2: Convert to cartesian and project away from the pole
    let mut region_positions: Vec<DVec3> = coordinates.iter().map(|c| c.to_cartesian()).collect();
    let planar = stereographic_projection(&region_positions)?;

    // Step 3: Triangulate the plane
    let triangulation = triangulator.triangulate(&planar)?;
    log::trace!(
        "triangulation: {} sides, {} unpaired",
        triangulation.num_sides(),
        triangulation.num_unpaired()
    );

    // Step 4: Stitch the boundary to the pole and put the pole back
    let apex = region_positions.len();
    let mesh = close_mesh(triangulation, apex)?;
    if mesh.num_regions() > apex {
        region_positions.push(PROJECTION_POLE);
    }

    log::debug!(
        "generated sphere: {} regions, {} triangles, {} sides",
        mesh.num_regions(),
        mesh.num_triangles(),
        mesh.num_sides()
    );

    Ok(GeneratedSphere {
        coordinates,
        region_positions,
        mesh,
    })
}

/// Generate a closed sphere mesh using [`HullTriangulator`]
///
/// # Example
///
/// ```rust
/// use sphere_quad_mesh::*;
///
/// let config = SphereConfigBuilder::new()
///     .seed(42)
///     .resolution(500)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let sphere = generate_sphere_default(&config).unwrap();
/// assert_eq!(sphere.mesh.num_regions(), 501);
/// ```
pub fn generate_sphere_default(config: &SphereConfig) -> Result<GeneratedSphere> {
    generate_sphere(config, &HullTriangulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SphereConfigBuilder;
    use crate::geometry::QuadGeometry;
    use crate::mesh::UNPAIRED;
    use crate::world::WorldData;

    fn config(seed: u32, resolution: usize, jitter: f64) -> SphereConfig {
        SphereConfigBuilder::new()
            .seed(seed)
            .resolution(resolution)
            .unwrap()
            .jitter(jitter)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_generate_sphere_closed() {
        for (seed, resolution, jitter) in [(1, 4, 0.0), (42, 10, 0.75), (7, 100, 0.75), (12345, 1000, 1.0)] {
            let sphere = generate_sphere_default(&config(seed, resolution, jitter)).unwrap();
            let mesh = &sphere.mesh;

            assert_eq!(sphere.coordinates.len(), resolution);
            assert_eq!(sphere.region_positions.len(), resolution + 1);
            assert_eq!(mesh.num_regions(), resolution + 1);

            for s in 0..mesh.num_sides() {
                let o = mesh.halfedges()[s];
                assert_ne!(o, UNPAIRED);
                assert_eq!(mesh.halfedges()[o], s);
            }

            // Closed triangulated sphere: F = 2V - 4, E = 3V - 6
            assert_eq!(mesh.num_triangles(), 2 * mesh.num_regions() - 4);
            assert_eq!(mesh.num_sides(), 6 * mesh.num_regions() - 12);
        }
    }

    #[test]
    fn test_generate_sphere_closed_at_high_resolution() {
        for jitter in [0.75, 1.0] {
            for seed in 0..3 {
                let resolution = 100_000;
                let sphere = generate_sphere_default(&config(seed, resolution, jitter))
                    .unwrap_or_else(|err| panic!("seed {} jitter {}: {}", seed, jitter, err));
                let mesh = &sphere.mesh;

                assert_eq!(mesh.num_regions(), resolution + 1);
                assert_eq!(sphere.region_positions.len(), mesh.num_regions());
                assert!(mesh
                    .halfedges()
                    .iter()
                    .enumerate()
                    .all(|(s, &o)| o != UNPAIRED && mesh.halfedges()[o] == s));
                assert_eq!(mesh.num_triangles(), 2 * mesh.num_regions() - 4);
            }
        }
    }

    #[test]
    fn test_generate_sphere_already_closed_adds_no_pole() {
        struct Tetrahedron;

        impl Triangulator for Tetrahedron {
            fn triangulate(&self, _points: &[glam::DVec2]) -> Result<Triangulation> {
                Ok(Triangulation {
                    triangles: vec![0, 1, 2, 0, 3, 1, 1, 3, 2, 2, 3, 0],
                    halfedges: vec![5, 8, 11, 10, 6, 0, 4, 9, 1, 7, 3, 2],
                })
            }
        }

        let sphere = generate_sphere(&config(5, 4, 0.0), &Tetrahedron).unwrap();

        assert_eq!(sphere.mesh.num_regions(), 4);
        assert_eq!(sphere.region_positions.len(), 4);
        assert!(!sphere.region_positions.contains(&PROJECTION_POLE));

        let world = WorldData::new(sphere);
        assert_eq!(world.region_positions.len(), world.mesh.num_regions());
    }

    #[test]
    fn test_generate_sphere_apex_is_pole() {
        let sphere = generate_sphere_default(&config(3, 200, 0.5)).unwrap();
        let apex = sphere.mesh.num_regions() - 1;

        assert_eq!(sphere.region_positions[apex], PROJECTION_POLE);
        assert!(sphere.mesh.triangles().contains(&apex));
    }

    #[test]
    fn test_generate_sphere_determinism() {
        let a = generate_sphere_default(&config(99, 300, 0.75)).unwrap();
        let b = generate_sphere_default(&config(99, 300, 0.75)).unwrap();

        assert_eq!(a.coordinates, b.coordinates);
        assert_eq!(a.mesh, b.mesh);
    }

    #[test]
    fn test_generate_sphere_rejects_tiny_resolution() {
        let mut config = config(1, 10, 0.5);
        config.resolution = 3;

        assert_eq!(
            generate_sphere_default(&config).unwrap_err(),
            SphereError::InvalidTesselation {
                resolution: 3,
                minimum: MIN_RESOLUTION,
            }
        );
    }

    #[test]
    fn test_generate_sphere_with_custom_triangulator() {
        struct Failing;

        impl Triangulator for Failing {
            fn triangulate(&self, _points: &[glam::DVec2]) -> Result<Triangulation> {
                Err(SphereError::DegenerateTriangulation("refused".to_string()))
            }
        }

        let result = generate_sphere(&config(1, 20, 0.5), &Failing);
        assert!(matches!(result, Err(SphereError::DegenerateTriangulation(_))));
    }

    #[test]
    fn test_full_pipeline_classification() {
        let sphere = generate_sphere_default(&config(42, 500, 0.75)).unwrap();
        let mut world = WorldData::new(sphere);

        // Southern hemisphere is ocean, a few sides carry flow
        for r in 0..world.mesh.num_regions() {
            world.region_elevation[r] = world.region_positions[r].z;
            world.region_moisture[r] = 0.5;
        }
        for s in (0..world.mesh.num_sides()).step_by(17) {
            world.side_flow[s] = 1.0;
        }
        world.assign_triangle_values();

        let mut first = QuadGeometry::for_mesh(&world.mesh);
        let mut second = QuadGeometry::for_mesh(&world.mesh);
        let counts = first.build(&world.mesh, &world.quad_fields()).unwrap();
        let again = second.build(&world.mesh, &world.quad_fields()).unwrap();

        assert_eq!(counts.total(), world.mesh.num_sides());
        assert!(counts.ridge > 0);
        assert!(counts.valley > 0);
        assert_eq!(counts, again);
        assert_eq!(first, second);

        let vertex_limit = (world.mesh.num_regions() + world.mesh.num_triangles()) as i32;
        assert!(first.indices.iter().all(|&i| i >= 0 && i < vertex_limit));
    }
}
