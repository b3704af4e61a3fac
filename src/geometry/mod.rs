//! Dual-quad render geometry
//!
//! Every edge of the sphere mesh, together with the two triangle centers on
//! either side of it, forms a quadrilateral `(r1, t1, r2, t2)`. Each side
//! emits one of the two triangles of that quad, so a full pass over all
//! sides covers the quad twice and yields two triangles per edge.
//!
//! There are two ways to fold a quad. The fold is chosen per edge so the
//! rendered crease follows the terrain: coastlines and rivers become valleys
//! and everything else becomes a ridge. See
//! <https://www.redblobgames.com/x/1725-procedural-elevation/#rendering>.

use glam::Vec3;

use crate::error::{Result, SphereError};
use crate::mesh::SphereMesh;

/// Per-region, per-triangle and per-side inputs for [`QuadGeometry::build`]
#[derive(Debug, Clone, Copy)]
pub struct QuadFields<'a> {
    pub region_positions: &'a [Vec3],
    pub triangle_positions: &'a [Vec3],
    pub region_elevation: &'a [f32],
    pub triangle_elevation: &'a [f32],
    pub region_moisture: &'a [f32],
    pub triangle_moisture: &'a [f32],
    pub side_flow: &'a [f32],
}

impl QuadFields<'_> {
    /// Check that every field covers the mesh
    fn validate(&self, mesh: &SphereMesh) -> Result<()> {
        let regions = mesh.num_regions();
        let triangles = mesh.num_triangles();
        let sides = mesh.num_sides();

        let checks = [
            ("region_positions", self.region_positions.len(), regions),
            ("triangle_positions", self.triangle_positions.len(), triangles),
            ("region_elevation", self.region_elevation.len(), regions),
            ("triangle_elevation", self.triangle_elevation.len(), triangles),
            ("region_moisture", self.region_moisture.len(), regions),
            ("triangle_moisture", self.triangle_moisture.len(), triangles),
            ("side_flow", self.side_flow.len(), sides),
        ];

        for (field, actual, expected) in checks {
            if actual < expected {
                return Err(SphereError::MissingField {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Number of sides folded each way by one [`QuadGeometry::build`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RidgeValleyCounts {
    pub ridge: usize,
    pub valley: usize,
}

impl RidgeValleyCounts {
    /// Total number of classified sides
    #[inline]
    pub fn total(&self) -> usize {
        self.ridge + self.valley
    }
}

/// Flat GPU-ready buffers for the dual-quad mesh
///
/// Buffers are sized once per mesh-size signature and rewritten in place by
/// every [`build`](Self::build). Vertices `0..num_regions` are regions and
/// vertices `num_regions..num_regions + num_triangles` are triangle centers.
/// Indices are `i32`, so at most `i32::MAX + 1` vertices can be addressed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuadGeometry {
    /// Three indices per side
    pub indices: Vec<i32>,
    /// `xyz` per vertex
    pub positions: Vec<f32>,
    /// `(elevation, moisture)` per vertex
    pub attributes: Vec<f32>,
}

impl QuadGeometry {
    /// Allocate zeroed buffers for a mesh of the given size
    pub fn allocate(num_regions: usize, num_triangles: usize, num_sides: usize) -> Self {
        let num_vertices = num_regions + num_triangles;
        Self {
            indices: vec![0; 3 * num_sides],
            positions: vec![0.0; 3 * num_vertices],
            attributes: vec![0.0; 2 * num_vertices],
        }
    }

    /// Allocate zeroed buffers sized for `mesh`
    pub fn for_mesh(mesh: &SphereMesh) -> Self {
        Self::allocate(mesh.num_regions(), mesh.num_triangles(), mesh.num_sides())
    }

    /// Number of vertices (regions followed by triangle centers)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of render triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn check_sizes(&self, mesh: &SphereMesh) -> Result<()> {
        let num_vertices = mesh.num_regions() + mesh.num_triangles();
        let checks = [
            ("indices", self.indices.len(), 3 * mesh.num_sides()),
            ("positions", self.positions.len(), 3 * num_vertices),
            ("attributes", self.attributes.len(), 2 * num_vertices),
        ];

        for (buffer, actual, expected) in checks {
            if actual != expected {
                return Err(SphereError::BufferSizeMismatch {
                    buffer,
                    expected,
                    actual,
                });
            }
        }
        check_index_range(num_vertices)
    }

    /// Fill the buffers from `mesh` and `fields`
    ///
    /// Positions are copied unmodified. A side is a valley when either of its
    /// regions is below sea level (elevation < 0) or when there is flow along
    /// it in either direction; it then emits `(r1, t2, t1)`. Otherwise it is a
    /// ridge and emits `(r1, r2, t1)`.
    ///
    /// # Errors
    ///
    /// Returns `BufferSizeMismatch` if the buffers were allocated for a
    /// different mesh size, `IndexOverflow` if the vertices do not fit `i32`
    /// indices, or `MissingField` if a field is shorter than the mesh
    /// requires. Nothing is written when an error is returned.
    pub fn build(&mut self, mesh: &SphereMesh, fields: &QuadFields<'_>) -> Result<RidgeValleyCounts> {
        self.check_sizes(mesh)?;
        fields.validate(mesh)?;

        let num_regions = mesh.num_regions();
        let num_triangles = mesh.num_triangles();

        let vertex_positions = fields.region_positions[..num_regions]
            .iter()
            .chain(&fields.triangle_positions[..num_triangles]);
        for (slot, position) in self.positions.chunks_exact_mut(3).zip(vertex_positions) {
            slot.copy_from_slice(&position.to_array());
        }

        let region_attributes = (0..num_regions).map(|r| [fields.region_elevation[r], fields.region_moisture[r]]);
        let triangle_attributes =
            (0..num_triangles).map(|t| [fields.triangle_elevation[t], fields.triangle_moisture[t]]);
        for (slot, pair) in self
            .attributes
            .chunks_exact_mut(2)
            .zip(region_attributes.chain(triangle_attributes))
        {
            slot.copy_from_slice(&pair);
        }

        let mut counts = RidgeValleyCounts::default();
        for (s, slot) in self.indices.chunks_exact_mut(3).enumerate() {
            let opposite = mesh.side_opposite(s);
            let r1 = mesh.side_begin_region(s);
            let r2 = mesh.side_begin_region(opposite);
            let t1 = num_regions + mesh.side_inner_triangle(s);
            let t2 = num_regions + mesh.side_inner_triangle(opposite);

            let coast = fields.region_elevation[r1] < 0.0 || fields.region_elevation[r2] < 0.0;
            let river = fields.side_flow[s] > 0.0 || fields.side_flow[opposite] > 0.0;
            let triangle = if coast || river {
                counts.valley += 1;
                [r1, t2, t1]
            } else {
                counts.ridge += 1;
                [r1, r2, t1]
            };

            // In range: check_index_range passed for every vertex id
            for (index, vertex) in slot.iter_mut().zip(triangle) {
                *index = vertex as i32;
            }
        }

        log::debug!("ridge={}, valley={}", counts.ridge, counts.valley);
        Ok(counts)
    }
}

/// Fail if vertex ids `0..num_vertices` do not all fit an `i32`
fn check_index_range(num_vertices: usize) -> Result<()> {
    match num_vertices.checked_sub(1).map(i32::try_from) {
        Some(Err(_)) => Err(SphereError::IndexOverflow { vertices: num_vertices }),
        _ => Ok(()),
    }
}
