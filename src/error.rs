//! Error types for mesh construction and engine boundaries.

use thiserror::Error;

/// Errors that can occur while building or driving a simulation.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A face references a vertex index outside the vertex pool.
    /// Fatal at adjacency construction; no partial graph is usable.
    #[error("face {face} references vertex {vertex}, but only {vertex_count} vertices exist")]
    InvalidMesh {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// A probability outside [0.0, 1.0] was passed to a randomize call.
    #[error("probability {0} is outside [0.0, 1.0]")]
    InvalidProbability(f64),

    /// A rule string could not be parsed as "B.../S..." notation.
    #[error("invalid rule string: {0:?}")]
    InvalidRuleString(String),
}
