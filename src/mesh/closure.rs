//! Closing an open triangulation into a sphere
//!
//! A planar triangulation of stereographically projected points is a disk.
//! Its boundary loop is stitched to one new apex region (the projection pole)
//! by fanning a triangle from every boundary side, which leaves a mesh with
//! no boundary at all.
//!
//! Same technique as the "ghost" region in
//! <https://github.com/redblobgames/dual-mesh>.

use std::collections::HashMap;

use crate::error::{Result, SphereError};
use crate::generation::Triangulation;
use crate::mesh::{next_side, SphereMesh, UNPAIRED};

/// Stitch every boundary side of `triangulation` to a new `apex` region
///
/// For the `i`-th boundary side `s` visited along the loop, new sides
/// `base = num_sides + 3i`, `base + 1` and `base + 2` form the triangle
/// `(end(s), begin(s), apex)`. Side `base` is paired with `s`, and the spoke
/// `base + 2` is paired with side `base + 1` of the next fan triangle.
///
/// A triangulation without boundary is returned as is and gains no region.
///
/// # Arguments
///
/// * `triangulation` - Open triangulation whose boundary forms one closed loop
/// * `apex` - Region id of the apex; must be greater than every region in use
///
/// # Errors
///
/// Returns `DegenerateTriangulation` if the triangulation breaks the
/// half-edge contract, references a region `>= apex`, has a boundary vertex
/// shared by two boundary sides, or has a boundary walk that does not close
/// after exactly as many steps as there are unpaired sides.
pub fn close_mesh(triangulation: Triangulation, apex: usize) -> Result<SphereMesh> {
    triangulation.validate(apex)?;

    let Triangulation {
        mut triangles,
        mut halfedges,
    } = triangulation;
    let num_sides = triangles.len();

    let mut num_unpaired = 0;
    let mut first_unpaired = UNPAIRED;
    let mut boundary_side_from: HashMap<usize, usize> = HashMap::new();
    for s in 0..num_sides {
        if halfedges[s] == UNPAIRED {
            num_unpaired += 1;
            first_unpaired = s;
            if let Some(previous) = boundary_side_from.insert(triangles[s], s) {
                return Err(SphereError::DegenerateTriangulation(format!(
                    "boundary sides {} and {} both start at region {}",
                    previous, s, triangles[s]
                )));
            }
        }
    }

    if num_unpaired == 0 {
        return SphereMesh::from_closed_parts(triangles, halfedges);
    }

    let fan_sides = 3 * num_unpaired;
    triangles.resize(num_sides + fan_sides, apex);
    halfedges.resize(num_sides + fan_sides, UNPAIRED);

    let mut s = first_unpaired;
    for i in 0..num_unpaired {
        if i > 0 && s == first_unpaired {
            return Err(SphereError::DegenerateTriangulation(format!(
                "boundary loop closed after {} of {} unpaired sides; multiple boundary loops",
                i, num_unpaired
            )));
        }

        let begin = triangles[s];
        let end = triangles[next_side(s)];
        let base = num_sides + 3 * i;

        halfedges[s] = base;
        halfedges[base] = s;
        triangles[base] = end;

        triangles[base + 1] = begin;
        triangles[base + 2] = apex;

        let spoke = num_sides + (3 * i + 4) % fan_sides;
        halfedges[base + 2] = spoke;
        halfedges[spoke] = base + 2;

        s = *boundary_side_from.get(&end).ok_or_else(|| {
            SphereError::DegenerateTriangulation(format!(
                "boundary walk left the boundary at region {}",
                end
            ))
        })?;
    }

    if s != first_unpaired {
        return Err(SphereError::DegenerateTriangulation(format!(
            "boundary walk did not return to side {} after {} steps",
            first_unpaired, num_unpaired
        )));
    }

    log::trace!(
        "closed {} boundary sides into apex {} ({} -> {} sides)",
        num_unpaired,
        apex,
        num_sides,
        triangles.len()
    );

    SphereMesh::from_closed_parts(triangles, halfedges)
}
