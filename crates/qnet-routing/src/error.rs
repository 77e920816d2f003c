//! Error types for qnet-routing.

use qnet_entanglement::EntanglementError;
use thiserror::Error;

use crate::NodeIndex;

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while routing demands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A demand names a node outside the capacity graph.
    #[error("node {index} out of range for {nodes} nodes")]
    NodeOutOfRange { index: NodeIndex, nodes: usize },

    /// A demand has the same source and destination.
    #[error("demand source and destination are both {0}")]
    SelfDemand(NodeIndex),

    /// A path is shorter than one hop.
    #[error("path needs at least two nodes, got {0}")]
    PathTooShort(usize),

    /// The capacity graph refused an update.
    #[error("capacity update failed: {0}")]
    Capacity(#[from] EntanglementError),
}
