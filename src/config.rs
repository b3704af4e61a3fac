//! Sphere generation configuration and builder
//!
//! This module provides the configuration used for deterministic sphere mesh generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SphereError};

/// Smallest point count that still yields a spherical hull
pub const MIN_RESOLUTION: usize = 4;

/// Configuration for deterministic sphere mesh generation
///
/// The same configuration always produces the identical point sequence and mesh.
///
/// # Example
///
/// ```rust
/// use sphere_quad_mesh::*;
///
/// let config = SphereConfigBuilder::new()
///     .seed(42)
///     .resolution(2_000)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: SphereConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereConfig {
    /// Seed for the random source that drives point jitter
    pub seed: u32,

    /// Number of points distributed on the sphere (regions before closure)
    pub resolution: usize,

    /// Jitter strength in `[0, 1]`
    ///
    /// - 0.0: pure Fibonacci spiral
    /// - 0.75: default, breaks up the spiral pattern
    /// - 1.0: maximum jitter
    pub jitter: f64,
}

impl SphereConfig {
    /// Number of regions in the closed mesh, counting the appended pole
    #[inline]
    pub fn region_count(&self) -> usize {
        self.resolution + 1
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            resolution: 10_000,
            jitter: 0.75,
        }
    }
}

/// Builder for creating SphereConfig with validation
///
/// # Example
///
/// ```rust
/// use sphere_quad_mesh::*;
///
/// let config = SphereConfigBuilder::new()
///     .seed(12345)
///     .resolution(500)
///     .unwrap()
///     .jitter(0.5)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.resolution, 500);
/// ```
#[derive(Debug, Clone)]
pub struct SphereConfigBuilder {
    seed: Option<u32>,
    resolution: usize,
    jitter: f64,
}

impl SphereConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - resolution: 10,000 points
    /// - jitter: 0.75
    pub fn new() -> Self {
        let defaults = SphereConfig::default();
        Self {
            seed: None,
            resolution: defaults.resolution,
            jitter: defaults.jitter,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of points to distribute
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if resolution < 4
    pub fn resolution(mut self, resolution: usize) -> Result<Self> {
        if resolution < MIN_RESOLUTION {
            return Err(SphereError::InvalidConfig(format!(
                "resolution must be >= {} (got {})",
                MIN_RESOLUTION, resolution
            )));
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Set the jitter strength
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if jitter is not a finite value in `[0, 1]`
    pub fn jitter(mut self, jitter: f64) -> Result<Self> {
        if !jitter.is_finite() || !(0.0..=1.0).contains(&jitter) {
            return Err(SphereError::InvalidConfig(format!(
                "jitter must be within [0, 1] (got {})",
                jitter
            )));
        }
        self.jitter = jitter;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<SphereConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(SphereConfig {
            seed,
            resolution: self.resolution,
            jitter: self.jitter,
        })
    }
}

impl Default for SphereConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
