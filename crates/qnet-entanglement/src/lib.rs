//! QNet Entanglement
//!
//! Turns per-node qubit budgets and raw connectivity into a capacity-bearing
//! graph.
//!
//! # Slots and Pairings
//!
//! Every [`Node`] owns `capacity` slots. Entangling two nodes occupies one
//! free slot on each side and records the pairing at both ends, so the
//! relation is always symmetric:
//!
//! ```text
//! node A slot i ──► (B, j)
//! node B slot j ──► (A, i)
//! ```
//!
//! # Capacity Graph
//!
//! [`EntanglementEngine::derive_capacity_graph`] counts pairings per node
//! pair. The result is a snapshot: later changes to node state do not flow
//! into an already derived graph.

mod capacity;
mod engine;
mod error;
mod node;

pub use capacity::{Capacity, CapacityGraph};
pub use engine::{CapacityStats, EntanglementEngine};
pub use error::{EntanglementError, Result};
pub use node::{Node, SlotRef};

pub use qnet_topology::NodeIndex;
