//! Error types for qnet-topology.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while building or validating a topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// The requested node-count range is empty.
    #[error("invalid node range: min {min} > max {max}")]
    InvalidRange { min: usize, max: usize },

    /// Fewer nodes than any link can exist between.
    #[error("topology needs at least {min} nodes, got {actual}")]
    TooSmall { min: usize, actual: usize },

    /// A supplied matrix is not square.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    /// A supplied entry is not 0 or 1.
    #[error("entry ({row}, {col}) = {value} is not a 0/1 link")]
    InvalidLink { row: usize, col: usize, value: i64 },

    /// A node links to itself.
    #[error("node {0} links to itself")]
    SelfLink(usize),

    /// A link is present in one direction only.
    #[error("link ({row}, {col}) is not mirrored")]
    Asymmetric { row: usize, col: usize },
}
