// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Frame-driven coordination
pub mod application;

// Infrastructure layer - mesh fixtures and error taxonomy
pub mod error;
pub mod mesh;

// Re-exports for convenience
pub use application::{AnimationDriver, DEFAULT_MAX_EXTRUSION, DEFAULT_MIN_EXTRUSION};
pub use domain::{AdjacencyGraph, AdjacencyPolicy, Cell, Engine, Generation, LifeRule};
pub use error::LifeError;
pub use mesh::TriangleMesh;
