//! Spherical and stereographic projections
//!
//! The stereographic projection maps the unit sphere minus the pole `(0, 0, 1)`
//! onto the plane `z = 0`. Circles on the sphere map to circles in the plane,
//! which is what lets a planar Delaunay triangulation stand in for a spherical one.
//! See <https://en.wikipedia.org/wiki/Stereographic_projection>.

use glam::{DVec2, DVec3};

use crate::error::{Result, SphereError};

/// The point the stereographic projection is taken from
pub const PROJECTION_POLE: DVec3 = DVec3::Z;

/// Points closer than this to `z = 1` are treated as the projection pole
const POLE_EPSILON: f64 = 1e-12;

/// Convert latitude/longitude in degrees to a unit cartesian vector
///
/// ```rust
/// use sphere_quad_mesh::generation::to_cartesian;
///
/// let north = to_cartesian(90.0, 0.0);
/// assert!((north.z - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn to_cartesian(latitude_degrees: f64, longitude_degrees: f64) -> DVec3 {
    let lat = latitude_degrees.to_radians();
    let lon = longitude_degrees.to_radians();
    DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Project points on the unit sphere onto the plane
///
/// Uses `X = x / (1 - z)`, `Y = y / (1 - z)`.
///
/// # Errors
///
/// Returns `DegenerateProjection` for the first point lying on the projection
/// pole. The pole must be excluded from the input and added back after
/// triangulation as the closure apex.
pub fn stereographic_projection(points: &[DVec3]) -> Result<Vec<DVec2>> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let denominator = 1.0 - point.z;
            if denominator <= POLE_EPSILON {
                return Err(SphereError::DegenerateProjection { index });
            }
            Ok(DVec2::new(point.x / denominator, point.y / denominator))
        })
        .collect()
}

/// Lift a planar point back onto the unit sphere
///
/// Inverse of [`stereographic_projection`]; never returns the pole itself.
#[inline]
pub fn inverse_stereographic(point: DVec2) -> DVec3 {
    let length_squared = point.length_squared();
    let denominator = 1.0 + length_squared;
    DVec3::new(
        2.0 * point.x / denominator,
        2.0 * point.y / denominator,
        (length_squared - 1.0) / denominator,
    )
}
