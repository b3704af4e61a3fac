//! Error types for sphere mesh generation

use thiserror::Error;

/// Errors that can occur while generating the sphere mesh or its render geometry
///
/// None of these are recoverable inside the crate: every operation either
/// completes fully or returns the first error it hits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SphereError {
    /// Point count is too small for the requested operation
    #[error("invalid tesselation resolution {resolution}: need at least {minimum} points")]
    InvalidTesselation {
        /// Requested number of points
        resolution: usize,
        /// Smallest accepted number of points
        minimum: usize,
    },

    /// A point sitting on the projection pole was passed to the stereographic projection
    #[error("cannot project point {index}: it lies on the projection pole")]
    DegenerateProjection {
        /// Index of the offending point in the input sequence
        index: usize,
    },

    /// Triangulation output is malformed or its boundary is not a single closed loop
    #[error("degenerate triangulation: {0}")]
    DegenerateTriangulation(String),

    /// A render buffer does not match the sizes computed for the mesh
    #[error("buffer `{buffer}` has length {actual}, expected {expected}")]
    BufferSizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The mesh has more vertices than an `i32` index buffer can address
    #[error("{vertices} vertices cannot be addressed by i32 indices")]
    IndexOverflow { vertices: usize },

    /// A per-region, per-triangle or per-side field is missing or too short
    #[error("field `{field}` has length {actual}, expected at least {expected}")]
    MissingField {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for sphere mesh operations
pub type Result<T> = std::result::Result<T, SphereError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SphereError::InvalidTesselation {
            resolution: 0,
            minimum: 1,
        };
        assert_eq!(
            err.to_string(),
            "invalid tesselation resolution 0: need at least 1 points"
        );

        let err = SphereError::BufferSizeMismatch {
            buffer: "indices",
            expected: 36,
            actual: 12,
        };
        assert!(err.to_string().contains("indices"));
        assert!(err.to_string().contains("36"));

        let err = SphereError::IndexOverflow { vertices: 5 };
        assert_eq!(err.to_string(), "5 vertices cannot be addressed by i32 indices");
    }
}
