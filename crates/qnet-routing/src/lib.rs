//! QNet Routing
//!
//! Path search and greedy scheduling over a capacity graph whose link units
//! are consumed as paths are granted.
//!
//! # Path Search
//!
//! [`find_all_simple_paths`] enumerates every simple path between two nodes
//! over edges with capacity left. It is a pure function: no caching, no
//! shared state, so callers rediscover paths from scratch after every
//! capacity change.
//!
//! # Scheduling
//!
//! [`DemandScheduler`] serves demands round-robin. Each turn a demand gets
//! the shortest path still available, one unit is removed from every edge on
//! it, and the demand goes to the back of the queue. A demand with no path
//! left is dropped for good. The score `k` is the smallest number of paths
//! any demand received.

mod demand;
mod error;
mod path;
mod scheduler;

pub use demand::{Demand, SdPair, SdPairConfig, SdPairGenerator};
pub use error::{Result, RoutingError};
pub use path::{find_all_simple_paths, has_path, select_path, Path};
pub use scheduler::{DemandScheduler, ScheduleOutcome};

pub use qnet_entanglement::{CapacityGraph, NodeIndex};
