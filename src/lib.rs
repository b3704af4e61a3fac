//! Closed spherical half-edge meshes with ridge/valley dual-quad geometry
//!
//! Distributes jittered points on a Fibonacci spiral, triangulates them
//! through a stereographic projection, closes the resulting disk into a
//! two-manifold sphere mesh, and packs GPU-ready buffers whose per-edge
//! diagonal follows the terrain.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sphere_quad_mesh::*;
//!
//! let config = SphereConfigBuilder::new()
//!     .seed(42)
//!     .resolution(10_000).unwrap()
//!     .jitter(0.75).unwrap()
//!     .build().unwrap();
//!
//! let sphere = generate_sphere_default(&config).unwrap();
//! let mut world = WorldData::new(sphere);
//! // ... fill world.region_elevation, world.region_moisture, world.side_flow ...
//! world.assign_triangle_values();
//!
//! let mut geometry = QuadGeometry::for_mesh(&world.mesh);
//! let counts = geometry.build(&world.mesh, &world.quad_fields()).unwrap();
//! println!("ridge={} valley={}", counts.ridge, counts.valley);
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration and coordinates

// Modules
pub mod error;
pub mod config;
pub mod generation;
pub mod mesh;
pub mod geometry;
pub mod world;

// Re-export core types for convenience
pub use error::{SphereError, Result};
pub use config::{SphereConfig, SphereConfigBuilder};
pub use generation::{
    distribute, generate_sphere, generate_sphere_default, seeded_random_source, Coordinate, GeneratedSphere,
    HullTriangulator, Triangulation, Triangulator,
};
pub use mesh::{close_mesh, SphereMesh, UNPAIRED};
pub use geometry::{QuadFields, QuadGeometry, RidgeValleyCounts};
pub use world::WorldData;

// Re-export glam vector types for convenience
pub use glam::{DVec3, Vec3};
