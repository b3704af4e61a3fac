//! Closed half-edge sphere mesh
//!
//! The mesh is stored as two flat arrays indexed by side ("half-edge") id.
//! Naming follows the dual-mesh convention: `r` is a region (point),
//! `s` a side, `t` a triangle. Side `s` belongs to triangle `s / 3`.

mod closure;

pub use closure::close_mesh;

use crate::error::{Result, SphereError};

/// Marks a side with no opposite (a boundary edge of an open triangulation)
pub const UNPAIRED: usize = usize::MAX;

/// Next side within the same triangle
#[inline]
pub fn next_side(s: usize) -> usize {
    if s % 3 == 2 {
        s - 2
    } else {
        s + 1
    }
}

/// Previous side within the same triangle
#[inline]
pub fn prev_side(s: usize) -> usize {
    if s % 3 == 0 {
        s + 2
    } else {
        s - 1
    }
}

/// A closed, two-manifold triangle mesh in half-edge form
///
/// Every side has exactly one opposite; there is no boundary. Instances are
/// produced by [`close_mesh`] or checked by [`SphereMesh::from_closed_parts`],
/// so accessors can index `halfedges` without checking for [`UNPAIRED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SphereMesh {
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
    num_regions: usize,
}

impl SphereMesh {
    /// Wrap half-edge arrays that already describe a closed mesh
    ///
    /// # Errors
    ///
    /// Returns `DegenerateTriangulation` if the arrays differ in length, are
    /// not whole triangles, contain an unpaired side, or pair sides
    /// non-mutually.
    pub fn from_closed_parts(triangles: Vec<usize>, halfedges: Vec<usize>) -> Result<Self> {
        if triangles.len() != halfedges.len() || triangles.len() % 3 != 0 {
            return Err(SphereError::DegenerateTriangulation(format!(
                "{} triangle entries and {} halfedge entries do not form a mesh",
                triangles.len(),
                halfedges.len()
            )));
        }

        for (s, &opposite) in halfedges.iter().enumerate() {
            if opposite == UNPAIRED {
                return Err(SphereError::DegenerateTriangulation(format!(
                    "side {} is unpaired in a closed mesh",
                    s
                )));
            }
            if opposite == s || opposite >= halfedges.len() || halfedges[opposite] != s {
                return Err(SphereError::DegenerateTriangulation(format!(
                    "side {} pairs with {} but the pairing is not mutual",
                    s, opposite
                )));
            }
        }

        let num_regions = triangles.iter().max().map_or(0, |&r| r + 1);
        Ok(Self {
            triangles,
            halfedges,
            num_regions,
        })
    }

    /// Region id at the start of each side
    #[inline]
    pub fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    /// Opposite side of each side
    #[inline]
    pub fn halfedges(&self) -> &[usize] {
        &self.halfedges
    }

    /// Number of regions (max region id + 1, including the closure apex)
    #[inline]
    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    #[inline]
    pub fn num_sides(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Region the side starts at
    #[inline]
    pub fn side_begin_region(&self, s: usize) -> usize {
        self.triangles[s]
    }

    /// Region the side ends at
    #[inline]
    pub fn side_end_region(&self, s: usize) -> usize {
        self.triangles[next_side(s)]
    }

    /// Triangle the side belongs to
    #[inline]
    pub fn side_inner_triangle(&self, s: usize) -> usize {
        s / 3
    }

    /// Triangle on the other side of the edge
    #[inline]
    pub fn side_outer_triangle(&self, s: usize) -> usize {
        self.halfedges[s] / 3
    }

    #[inline]
    pub fn side_opposite(&self, s: usize) -> usize {
        self.halfedges[s]
    }

    /// The three regions of a triangle, in winding order
    #[inline]
    pub fn triangle_regions(&self, t: usize) -> [usize; 3] {
        [
            self.triangles[3 * t],
            self.triangles[3 * t + 1],
            self.triangles[3 * t + 2],
        ]
    }

    /// The three sides of a triangle
    #[inline]
    pub fn triangle_sides(&self, t: usize) -> [usize; 3] {
        [3 * t, 3 * t + 1, 3 * t + 2]
    }

    /// Give back the raw `(triangles, halfedges)` arrays
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.triangles, self.halfedges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tetrahedron over regions 0..4 with outward winding
    fn tetrahedron() -> SphereMesh {
        // Faces: (0,1,2) (0,3,1) (1,3,2) (2,3,0)
        let triangles = vec![0, 1, 2, 0, 3, 1, 1, 3, 2, 2, 3, 0];
        let halfedges = vec![5, 8, 11, 10, 6, 0, 4, 9, 1, 7, 3, 2];
        SphereMesh::from_closed_parts(triangles, halfedges).unwrap()
    }

    #[test]
    fn test_next_and_prev_side() {
        assert_eq!(next_side(0), 1);
        assert_eq!(next_side(1), 2);
        assert_eq!(next_side(2), 0);
        assert_eq!(next_side(5), 3);
        assert_eq!(prev_side(3), 5);
        assert_eq!(prev_side(4), 3);
        for s in 0..30 {
            assert_eq!(prev_side(next_side(s)), s);
        }
    }

    #[test]
    fn test_tetrahedron_counts() {
        let mesh = tetrahedron();
        assert_eq!(mesh.num_regions(), 4);
        assert_eq!(mesh.num_sides(), 12);
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_tetrahedron_accessors() {
        let mesh = tetrahedron();
        for s in 0..mesh.num_sides() {
            let o = mesh.side_opposite(s);
            assert_eq!(mesh.side_opposite(o), s);
            assert_eq!(mesh.side_begin_region(s), mesh.side_end_region(o));
            assert_eq!(mesh.side_end_region(s), mesh.side_begin_region(o));
            assert_eq!(mesh.side_outer_triangle(s), mesh.side_inner_triangle(o));
        }
        assert_eq!(mesh.triangle_regions(1), [0, 3, 1]);
        assert_eq!(mesh.triangle_sides(2), [6, 7, 8]);
    }

    #[test]
    fn test_from_closed_parts_rejects_boundary() {
        let result = SphereMesh::from_closed_parts(vec![0, 1, 2], vec![UNPAIRED; 3]);
        assert!(matches!(result, Err(SphereError::DegenerateTriangulation(_))));
    }

    #[test]
    fn test_from_closed_parts_rejects_length_mismatch() {
        let result = SphereMesh::from_closed_parts(vec![0, 1, 2], vec![1, 0]);
        assert!(result.is_err());
    }
}
