//! Planar Delaunay triangulation service
//!
//! The mesh core only consumes a triangulation through the [`Triangulator`]
//! trait. [`HullTriangulator`] is the bundled implementation: it lifts the
//! planar points back onto the sphere and takes their 3D convex hull with
//! parry3d in double precision. For points on a sphere the hull faces are the
//! spherical Delaunay triangles; the faces visible from the projection pole
//! are exactly the ones whose circumcircle would contain the point at infinity
//! in the plane, so dropping them leaves the planar Delaunay triangulation.

use std::collections::HashMap;

use glam::{DVec2, DVec3};
use parry3d_f64::math::Point;
use parry3d_f64::transformation;

use crate::error::{Result, SphereError};
use crate::generation::projection::{inverse_stereographic, PROJECTION_POLE};
use crate::mesh::{next_side, UNPAIRED};

/// Output of a triangulation service in half-edge form
///
/// `triangles[s]` is the point index at the start of side `s`, and
/// `halfedges[s]` is the opposite side or [`UNPAIRED`] on the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Triangulation {
    pub triangles: Vec<usize>,
    pub halfedges: Vec<usize>,
}

impl Triangulation {
    /// Number of sides (half-edges)
    #[inline]
    pub fn num_sides(&self) -> usize {
        self.triangles.len()
    }

    /// Number of unpaired (boundary) sides
    pub fn num_unpaired(&self) -> usize {
        self.halfedges.iter().filter(|&&h| h == UNPAIRED).count()
    }

    /// Check the half-edge contract every triangulation must satisfy
    ///
    /// # Errors
    ///
    /// Returns `DegenerateTriangulation` if the arrays differ in length, are not
    /// whole triangles, reference a point `>= num_points`, pair a side with
    /// itself, or contain a non-mutual pairing.
    pub fn validate(&self, num_points: usize) -> Result<()> {
        let num_sides = self.triangles.len();
        if self.halfedges.len() != num_sides {
            return Err(SphereError::DegenerateTriangulation(format!(
                "{} triangle entries but {} halfedge entries",
                num_sides,
                self.halfedges.len()
            )));
        }
        if num_sides % 3 != 0 {
            return Err(SphereError::DegenerateTriangulation(format!(
                "{} sides do not form whole triangles",
                num_sides
            )));
        }
        if let Some(s) = self.triangles.iter().position(|&r| r >= num_points) {
            return Err(SphereError::DegenerateTriangulation(format!(
                "side {} starts at point {} but only {} points exist",
                s, self.triangles[s], num_points
            )));
        }

        for (s, &opposite) in self.halfedges.iter().enumerate() {
            if opposite == UNPAIRED {
                continue;
            }
            if opposite == s {
                return Err(SphereError::DegenerateTriangulation(format!(
                    "side {} is its own opposite",
                    s
                )));
            }
            if opposite >= num_sides || self.halfedges[opposite] != s {
                return Err(SphereError::DegenerateTriangulation(format!(
                    "side {} pairs with {} but the pairing is not mutual",
                    s, opposite
                )));
            }
        }

        Ok(())
    }
}

/// A planar triangulation service
pub trait Triangulator {
    /// Triangulate `points`, returning sides with consistent winding
    fn triangulate(&self, points: &[DVec2]) -> Result<Triangulation>;
}

/// Delaunay triangulation of stereographically projected points via a 3D convex hull
#[derive(Debug, Clone, Copy, Default)]
pub struct HullTriangulator;

impl Triangulator for HullTriangulator {
    fn triangulate(&self, points: &[DVec2]) -> Result<Triangulation> {
        let lifted: Vec<DVec3> = points.iter().map(|&p| inverse_stereographic(p)).collect();
        let faces = hull_faces(&lifted)?;
        let triangulation = pair_sides(&faces)?;

        let mut used = vec![false; points.len()];
        for &r in &triangulation.triangles {
            used[r] = true;
        }
        if let Some(missing) = used.iter().position(|&u| !u) {
            return Err(SphereError::DegenerateTriangulation(format!(
                "point {} is not part of any triangle",
                missing
            )));
        }

        triangulation.validate(points.len())?;
        log::trace!(
            "triangulated {} points into {} triangles ({} boundary sides)",
            points.len(),
            triangulation.num_sides() / 3,
            triangulation.num_unpaired()
        );
        Ok(triangulation)
    }
}

/// Outward-oriented hull faces not visible from the projection pole, as input indices
fn hull_faces(lifted: &[DVec3]) -> Result<Vec<[usize; 3]>> {
    if lifted.len() < 3 {
        return Err(SphereError::DegenerateTriangulation(format!(
            "need at least 3 points, got {}",
            lifted.len()
        )));
    }

    // Neighbouring points on a dense sphere are closer to coplanar than f32 can resolve
    let hull_input: Vec<Point<f64>> = lifted.iter().map(|p| Point::new(p.x, p.y, p.z)).collect();

    // The hull may drop and re-index points, so map its vertices back by exact coordinates
    let mut index_of: HashMap<[u64; 3], usize> = HashMap::with_capacity(hull_input.len());
    for (i, p) in hull_input.iter().enumerate() {
        if index_of.insert(point_key(p), i).is_some() {
            return Err(SphereError::DegenerateTriangulation(format!(
                "point {} coincides with an earlier point",
                i
            )));
        }
    }

    let (vertices, hull_triangles) = transformation::try_convex_hull(&hull_input)
        .map_err(|err| SphereError::DegenerateTriangulation(format!("convex hull failed: {:?}", err)))?;

    let centroid = lifted.iter().copied().sum::<DVec3>() / lifted.len() as f64;

    let mut faces = Vec::with_capacity(hull_triangles.len());
    for triangle in &hull_triangles {
        let mut face = [0usize; 3];
        for (slot, &vertex) in face.iter_mut().zip(triangle.iter()) {
            let key = point_key(&vertices[vertex as usize]);
            *slot = *index_of.get(&key).ok_or_else(|| {
                SphereError::DegenerateTriangulation(format!(
                    "hull vertex {} does not match any input point",
                    vertex
                ))
            })?;
        }

        let [a, b, c] = face.map(|i| lifted[i]);
        let mut normal = (b - a).cross(c - a);
        if normal.dot(a - centroid) < 0.0 {
            face.swap(1, 2);
            normal = -normal;
        }

        if normal.dot(PROJECTION_POLE - a) <= 0.0 {
            faces.push(face);
        }
    }

    if faces.is_empty() {
        return Err(SphereError::DegenerateTriangulation(
            "no triangles remain after removing the pole cap".to_string(),
        ));
    }

    Ok(faces)
}

#[inline]
fn point_key(p: &Point<f64>) -> [u64; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

/// Build flat half-edge arrays from consistently wound faces
fn pair_sides(faces: &[[usize; 3]]) -> Result<Triangulation> {
    let triangles: Vec<usize> = faces.iter().flatten().copied().collect();
    let mut halfedges = vec![UNPAIRED; triangles.len()];

    let mut side_of_edge: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len());
    for s in 0..triangles.len() {
        let edge = (triangles[s], triangles[next_side(s)]);
        if side_of_edge.insert(edge, s).is_some() {
            return Err(SphereError::DegenerateTriangulation(format!(
                "directed edge {:?} appears twice",
                edge
            )));
        }
    }

    for s in 0..triangles.len() {
        let reverse = (triangles[next_side(s)], triangles[s]);
        if let Some(&opposite) = side_of_edge.get(&reverse) {
            halfedges[s] = opposite;
        }
    }

    Ok(Triangulation {
        triangles,
        halfedges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::fibonacci::{distribute, seeded_random_source};
    use crate::generation::projection::stereographic_projection;

    fn projected_points(count: usize, seed: u32) -> Vec<DVec2> {
        let points: Vec<DVec3> = distribute(count, 0.75, seeded_random_source(seed))
            .unwrap()
            .map(|c| c.to_cartesian())
            .collect();
        stereographic_projection(&points).unwrap()
    }

    #[test]
    fn test_validate_accepts_single_triangle() {
        let triangulation = Triangulation {
            triangles: vec![0, 1, 2],
            halfedges: vec![UNPAIRED; 3],
        };
        assert!(triangulation.validate(3).is_ok());
        assert_eq!(triangulation.num_unpaired(), 3);
    }

    #[test]
    fn test_validate_rejects_self_pairing() {
        let triangulation = Triangulation {
            triangles: vec![0, 1, 2],
            halfedges: vec![0, UNPAIRED, UNPAIRED],
        };
        assert!(triangulation.validate(3).is_err());
    }

    #[test]
    fn test_validate_rejects_non_mutual_pairing() {
        let triangulation = Triangulation {
            triangles: vec![0, 1, 2, 2, 1, 3],
            halfedges: vec![UNPAIRED, 3, UNPAIRED, UNPAIRED, UNPAIRED, UNPAIRED],
        };
        assert!(triangulation.validate(4).is_err());
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let triangulation = Triangulation {
            triangles: vec![0, 1, 2],
            halfedges: vec![UNPAIRED; 2],
        };
        assert!(triangulation.validate(3).is_err());
    }

    #[test]
    fn test_pair_sides_two_triangles() {
        let triangulation = pair_sides(&[[0, 1, 2], [2, 1, 3]]).unwrap();
        assert_eq!(triangulation.halfedges[1], 3);
        assert_eq!(triangulation.halfedges[3], 1);
        assert_eq!(triangulation.num_unpaired(), 4);
    }

    #[test]
    fn test_hull_triangulation_is_open_disk() {
        let points = projected_points(200, 42);
        let triangulation = HullTriangulator.triangulate(&points).unwrap();

        assert!(triangulation.validate(points.len()).is_ok());
        let unpaired = triangulation.num_unpaired();
        assert!(unpaired >= 3, "expected a boundary, got {} unpaired sides", unpaired);

        // Euler characteristic of a disk: V - E + F = 1
        let v = points.len() as i64;
        let f = (triangulation.num_sides() / 3) as i64;
        let paired = (triangulation.num_sides() - unpaired) as i64;
        let e = paired / 2 + unpaired as i64;
        assert_eq!(v - e + f, 1);
    }

    #[test]
    fn test_hull_triangulation_consistent_winding() {
        let points = projected_points(100, 7);
        let triangulation = HullTriangulator.triangulate(&points).unwrap();

        for s in 0..triangulation.num_sides() {
            let opposite = triangulation.halfedges[s];
            if opposite == UNPAIRED {
                continue;
            }
            assert_eq!(triangulation.triangles[s], triangulation.triangles[next_side(opposite)]);
            assert_eq!(triangulation.triangles[next_side(s)], triangulation.triangles[opposite]);
        }
    }

    #[test]
    fn test_hull_triangulation_too_few_points() {
        let points = vec![DVec2::ZERO, DVec2::X];
        assert!(HullTriangulator.triangulate(&points).is_err());
    }
}
