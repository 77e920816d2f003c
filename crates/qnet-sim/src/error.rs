//! Error types for qnet-sim.
//!
//! Each simulation stage fails with its own kind, so a driver can decide per
//! kind whether another attempt is worthwhile.

use qnet_entanglement::{EntanglementError, NodeIndex};
use qnet_routing::RoutingError;
use qnet_topology::TopologyError;
use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, TrialError>;

/// Why a simulation trial stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    /// The topology could not be generated.
    #[error("topology build failed: {0}")]
    Topology(#[from] TopologyError),

    /// Qubit assignment or capacity handling failed.
    #[error("entanglement failed: {0}")]
    Entanglement(#[from] EntanglementError),

    /// Some nodes have no capacity to any other node.
    #[error("capacity graph has isolated nodes {isolated:?}")]
    Disconnected { isolated: Vec<NodeIndex> },

    /// No demand could be drawn for this network size.
    #[error("no demands generated ({requested} requested for {nodes} nodes)")]
    NoDemands { requested: usize, nodes: usize },

    /// The scheduler rejected the demands or a capacity update.
    #[error("scheduling failed: {0}")]
    Routing(#[from] RoutingError),
}

impl TrialError {
    /// True if a fresh random draw may succeed where this one failed.
    ///
    /// Only disconnection depends on the random draw; every other kind
    /// repeats for the same parameters.
    pub fn is_transient(&self) -> bool {
        matches!(self, TrialError::Disconnected { .. })
    }

    /// The stage that failed, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            TrialError::Topology(_) => "topology",
            TrialError::Entanglement(_) => "entanglement",
            TrialError::Disconnected { .. } => "connectivity",
            TrialError::NoDemands { .. } => "demands",
            TrialError::Routing(_) => "scheduling",
        }
    }
}
