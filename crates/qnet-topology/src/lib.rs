//! QNet Topology
//!
//! Raw physical adjacency between network nodes, independent of any resource
//! state.
//!
//! # Model
//!
//! A topology is an n×n 0/1 matrix:
//! - symmetric (links are undirected)
//! - zero diagonal (no self links)
//! - built once per simulation run and never regenerated
//!
//! # Generation
//!
//! [`TopologyGenerator`] draws the node count uniformly from a range, decides
//! every unordered pair with a fair coin, then repairs under-connected nodes
//! until each one meets a degree floor (default `ceil(n/2)`).

mod error;
mod generator;
mod matrix;

pub use error::{Result, TopologyError};
pub use generator::{default_min_degree, TopologyConfig, TopologyGenerator};
pub use matrix::{NodeIndex, Topology};

/// Smallest node count the generator accepts.
pub const MIN_NODES: usize = 2;
