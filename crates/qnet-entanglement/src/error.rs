//! Error types for qnet-entanglement.

use thiserror::Error;

use crate::NodeIndex;

/// Result type for entanglement operations.
pub type Result<T> = std::result::Result<T, EntanglementError>;

/// Errors raised while assigning qubits or handling capacity matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntanglementError {
    /// The requested qubit range is empty.
    #[error("invalid qubit range: min {min} > max {max}")]
    InvalidCapacityRange { min: usize, max: usize },

    /// A node would be created with no slots.
    #[error("node {0} has zero capacity")]
    ZeroCapacity(NodeIndex),

    /// Fixed capacities do not match the topology size.
    #[error("{given} capacities supplied for {nodes} nodes")]
    CapacityCountMismatch { given: usize, nodes: usize },

    /// A supplied capacity matrix is not square.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    /// A supplied capacity matrix is not symmetric.
    #[error("capacity ({row}, {col}) differs from its mirror")]
    Asymmetric { row: usize, col: usize },

    /// A node has capacity to itself.
    #[error("node {0} has capacity to itself")]
    SelfCapacity(NodeIndex),

    /// An edge was decremented with no capacity left.
    #[error("edge ({from}, {to}) has no capacity left")]
    EdgeExhausted { from: NodeIndex, to: NodeIndex },

    /// A node index lies outside the graph.
    #[error("node {index} out of range for {nodes} nodes")]
    NodeOutOfRange { index: NodeIndex, nodes: usize },
}
