//! Fibonacci Spiral Point Distribution
//!
//! Generates near-uniform point distributions on a sphere using the Fibonacci
//! spiral (golden angle) method, with per-point jitter to break up the regular
//! spiral pattern.
//!
//! # Algorithm
//!
//! Points are placed at:
//! - Longitude: accumulated golden angle increments `π(3 - √5)`
//! - Latitude: `asin(z)` where `z` steps linearly from `1 - 1/n` down to `-(1 - 1/n)`
//!
//! Jitter is scaled by the local spiral spacing, so it shrinks near the poles
//! where points are naturally denser.
//!
//! # References
//!
//! - [Evenly distributed points on sphere](http://web.archive.org/web/20120421191837/http://www.cgafaq.info/wiki/Evenly_distributed_points_on_sphere)

use std::f64::consts::PI;
use std::iter::FusedIterator;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SphereError};
use crate::generation::projection::to_cartesian;

/// Spiral spacing numerator; the spiral constant is `SPIRAL_SCALE / sqrt(n)`
const SPIRAL_SCALE: f64 = 3.6;

/// Golden angle in radians, `π(3 - √5)` (~2.39996323)
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5.0_f64.sqrt())
}

/// A point on the sphere in degrees
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees, within `(-180, 180]`
    pub longitude: f64,
}

impl Coordinate {
    /// Unit cartesian vector for this coordinate
    #[inline]
    pub fn to_cartesian(self) -> DVec3 {
        to_cartesian(self.latitude, self.longitude)
    }
}

/// Build a deterministic random source returning values in `[0, 1)`
///
/// The same seed always yields the same sequence of values.
pub fn seeded_random_source(seed: u32) -> impl FnMut() -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    move || rng.gen::<f64>()
}

/// Start a jittered Fibonacci spiral of `count` points
///
/// The returned iterator is lazy and single-pass: it yields exactly `count`
/// coordinates and cannot be rewound. Re-invoking with the same arguments and
/// a random source seeded the same way reproduces the sequence bit for bit.
///
/// # Arguments
///
/// * `count` - Number of points to generate
/// * `jitter` - Jitter strength in `[0, 1]`
/// * `random` - Random source; every call must return a value in `[0, 1)`.
///   Values outside that range are not checked and skew the distribution.
///
/// # Errors
///
/// Returns `InvalidTesselation` if `count` is zero.
///
/// # Example
///
/// ```rust
/// use sphere_quad_mesh::generation::{distribute, seeded_random_source};
///
/// let points: Vec<_> = distribute(1000, 0.75, seeded_random_source(42))
///     .unwrap()
///     .collect();
/// assert_eq!(points.len(), 1000);
/// ```
pub fn distribute<R>(count: usize, jitter: f64, random: R) -> Result<FibonacciSpiral<R>>
where
    R: FnMut() -> f64,
{
    if count == 0 {
        return Err(SphereError::InvalidTesselation {
            resolution: count,
            minimum: 1,
        });
    }

    let n = count as f64;
    Ok(FibonacciSpiral {
        random,
        count,
        jitter,
        spiral_constant: SPIRAL_SCALE / n.sqrt(),
        z_step: 2.0 / n,
        golden_angle: golden_angle(),
        index: 0,
        longitude: 0.0,
    })
}

/// Pull-driven state of a Fibonacci spiral
///
/// Each call to [`Iterator::next`] computes one point and advances the spiral.
pub struct FibonacciSpiral<R> {
    random: R,
    count: usize,
    jitter: f64,
    spiral_constant: f64,
    z_step: f64,
    golden_angle: f64,
    index: usize,
    /// Accumulated longitude in radians (unjittered)
    longitude: f64,
}

impl<R> FibonacciSpiral<R> {
    /// Number of points not yet emitted
    #[inline]
    pub fn remaining(&self) -> usize {
        self.count - self.index
    }

    /// `z` (sine of latitude) of the point at `index`, centered per sample
    #[inline]
    fn z_at(&self, index: usize) -> f64 {
        1.0 - self.z_step * (index as f64 + 0.5)
    }
}

impl<R: FnMut() -> f64> Iterator for FibonacciSpiral<R> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.index == self.count {
            return None;
        }

        if self.index != 0 {
            self.longitude += self.golden_angle;
        }
        let z = self.z_at(self.index);

        let latitude_degrees = z.clamp(-1.0, 1.0).asin().to_degrees();
        let longitude_degrees = self.longitude.to_degrees();

        // Draw order is latitude pair first, then longitude pair
        let lat_draw = (self.random)() - (self.random)();
        let lon_draw = (self.random)() - (self.random)();

        let current_radius = z.cos();

        // Latitude jitter spans the gap to where the spiral has wound one turn further
        let spiral_radius = current_radius / self.spiral_constant;
        let circumference = self.z_step * 2.0 * PI * spiral_radius;
        let offset_degrees = (z - circumference).clamp(-1.0, 1.0).asin().to_degrees();
        let latitude_span = latitude_degrees - offset_degrees;
        let latitude = latitude_degrees + self.jitter * lat_draw * latitude_span;

        let longitude_span = (self.spiral_constant / current_radius).to_degrees();
        let longitude = wrap_longitude(longitude_degrees + self.jitter * lon_draw * longitude_span);

        self.index += 1;
        Some(Coordinate {
            latitude,
            longitude,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<R: FnMut() -> f64> ExactSizeIterator for FibonacciSpiral<R> {}

impl<R: FnMut() -> f64> FusedIterator for FibonacciSpiral<R> {}

/// Wrap a longitude in degrees into `(-180, 180]`
#[inline]
pub fn wrap_longitude(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}
