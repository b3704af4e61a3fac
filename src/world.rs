//! World data assembled on top of a generated sphere
//!
//! Uses the dual-mesh prefixes in spirit: region fields are indexed by region
//! id, triangle fields by triangle id, side fields by side id.

use glam::Vec3;

use crate::geometry::QuadFields;
use crate::generation::GeneratedSphere;
use crate::mesh::SphereMesh;

/// All per-element data of one generated world
///
/// Scalar fields start zeroed; filling them (elevation, moisture, flow) is up
/// to the caller.
#[derive(Debug, Clone)]
pub struct WorldData {
    pub mesh: SphereMesh,
    pub region_positions: Vec<Vec3>,
    /// Centroid of each triangle's three regions
    pub triangle_positions: Vec<Vec3>,
    pub region_elevation: Vec<f32>,
    pub triangle_elevation: Vec<f32>,
    pub region_moisture: Vec<f32>,
    pub triangle_moisture: Vec<f32>,
    pub side_flow: Vec<f32>,
}

impl WorldData {
    /// Build world data for a generated sphere
    pub fn new(sphere: GeneratedSphere) -> Self {
        let GeneratedSphere {
            mesh,
            region_positions,
            ..
        } = sphere;

        let region_positions: Vec<Vec3> = region_positions.iter().map(|p| p.as_vec3()).collect();
        let triangle_positions = triangle_centers(&mesh, &region_positions);

        let num_regions = mesh.num_regions();
        let num_triangles = mesh.num_triangles();
        let num_sides = mesh.num_sides();

        Self {
            mesh,
            region_positions,
            triangle_positions,
            region_elevation: vec![0.0; num_regions],
            triangle_elevation: vec![0.0; num_triangles],
            region_moisture: vec![0.0; num_regions],
            triangle_moisture: vec![0.0; num_triangles],
            side_flow: vec![0.0; num_sides],
        }
    }

    /// Set triangle elevation and moisture to the mean of their three regions
    pub fn assign_triangle_values(&mut self) {
        for t in 0..self.mesh.num_triangles() {
            let [r0, r1, r2] = self.mesh.triangle_regions(t);
            self.triangle_elevation[t] =
                (self.region_elevation[r0] + self.region_elevation[r1] + self.region_elevation[r2]) / 3.0;
            self.triangle_moisture[t] =
                (self.region_moisture[r0] + self.region_moisture[r1] + self.region_moisture[r2]) / 3.0;
        }
    }

    /// Borrow the fields for [`QuadGeometry::build`](crate::geometry::QuadGeometry::build)
    pub fn quad_fields(&self) -> QuadFields<'_> {
        QuadFields {
            region_positions: &self.region_positions,
            triangle_positions: &self.triangle_positions,
            region_elevation: &self.region_elevation,
            triangle_elevation: &self.triangle_elevation,
            region_moisture: &self.region_moisture,
            triangle_moisture: &self.triangle_moisture,
            side_flow: &self.side_flow,
        }
    }
}

/// Centroid of every triangle (not projected back onto the sphere)
pub fn triangle_centers(mesh: &SphereMesh, region_positions: &[Vec3]) -> Vec<Vec3> {
    (0..mesh.num_triangles())
        .map(|t| {
            let [a, b, c] = mesh.triangle_regions(t);
            (region_positions[a] + region_positions[b] + region_positions[c]) / 3.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SphereConfigBuilder;
    use crate::generation::generate_sphere_default;

    fn small_world() -> WorldData {
        let config = SphereConfigBuilder::new()
            .seed(42)
            .resolution(60)
            .unwrap()
            .build()
            .unwrap();
        WorldData::new(generate_sphere_default(&config).unwrap())
    }

    #[test]
    fn test_world_field_lengths() {
        let world = small_world();
        assert_eq!(world.region_positions.len(), world.mesh.num_regions());
        assert_eq!(world.triangle_positions.len(), world.mesh.num_triangles());
        assert_eq!(world.region_elevation.len(), world.mesh.num_regions());
        assert_eq!(world.triangle_moisture.len(), world.mesh.num_triangles());
        assert_eq!(world.side_flow.len(), world.mesh.num_sides());
    }

    #[test]
    fn test_triangle_centers_inside_sphere() {
        let world = small_world();
        for center in &world.triangle_positions {
            let length = center.length();
            assert!(length > 0.0 && length < 1.0 + 1e-5, "centroid length {}", length);
        }
    }

    #[test]
    fn test_assign_triangle_values() {
        let mut world = small_world();
        for r in 0..world.mesh.num_regions() {
            world.region_elevation[r] = 3.0;
            world.region_moisture[r] = if r % 2 == 0 { 0.0 } else { 0.3 };
        }
        world.assign_triangle_values();

        for t in 0..world.mesh.num_triangles() {
            assert!((world.triangle_elevation[t] - 3.0).abs() < 1e-6);
            let [a, b, c] = world.mesh.triangle_regions(t);
            let expected = (world.region_moisture[a] + world.region_moisture[b] + world.region_moisture[c]) / 3.0;
            assert!((world.triangle_moisture[t] - expected).abs() < 1e-6);
        }
    }
}
