//! Round-robin greedy scheduling of demands over shared capacity.
//!
//! # Loop
//!
//! While the queue is non-empty:
//! 1. Pop the front demand
//! 2. Enumerate all simple paths for it in the current graph
//! 3. No paths: drop the demand; its path list is final
//! 4. Otherwise grant the shortest path, remove one unit from each of its
//!    edges (both directions), and push the demand to the back
//!
//! Every grant removes at least one unit of finite capacity, so the loop
//! always terminates.

use std::collections::VecDeque;

use tracing::{debug, debug_span, info};

use crate::{find_all_simple_paths, select_path, CapacityGraph, Demand, Result, RoutingError, SdPair};

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleOutcome {
    demands: Vec<Demand>,
    rounds: usize,
}

impl ScheduleOutcome {
    /// Final demands, in input order.
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Number of queue pops, granted or not.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Scheduling score `k`: fewest paths granted to any demand.
    ///
    /// `None` when there were no demands.
    pub fn score(&self) -> Option<usize> {
        self.demands.iter().map(Demand::allocated).min()
    }

    /// Total paths granted over all demands.
    pub fn total_paths(&self) -> usize {
        self.demands.iter().map(Demand::allocated).sum()
    }
}

/// Greedy scheduler owning a private capacity snapshot.
#[derive(Debug, Clone)]
pub struct DemandScheduler {
    graph: CapacityGraph,
}

impl DemandScheduler {
    /// Take ownership of a capacity snapshot; pass a clone to keep the original.
    pub fn new(graph: CapacityGraph) -> Self {
        Self { graph }
    }

    /// Capacity left after the runs so far.
    pub fn remaining_capacity(&self) -> &CapacityGraph {
        &self.graph
    }

    /// Serve `pairs` until none can be routed any further.
    pub fn schedule(&mut self, pairs: &[SdPair]) -> Result<ScheduleOutcome> {
        let nodes = self.graph.len();
        for pair in pairs {
            for index in [pair.source, pair.dest] {
                if index >= nodes {
                    return Err(RoutingError::NodeOutOfRange { index, nodes });
                }
            }
            if pair.source == pair.dest {
                return Err(RoutingError::SelfDemand(pair.source));
            }
        }

        let span = debug_span!("schedule", demands = pairs.len());
        let _enter = span.enter();

        let mut demands: Vec<Demand> = pairs.iter().copied().map(Demand::new).collect();
        let mut queue: VecDeque<usize> = (0..demands.len()).collect();
        let mut rounds = 0;

        while let Some(id) = queue.pop_front() {
            rounds += 1;
            let demand = &mut demands[id];
            let pair = demand.pair();

            let paths = find_all_simple_paths(&self.graph, pair.source, pair.dest);
            let Some(path) = select_path(&paths) else {
                debug!(%pair, granted = demand.allocated(), "no path left, dropping demand");
                continue;
            };

            for (a, b) in path.edges() {
                self.graph.decrement_edge(a, b)?;
            }
            debug!(%pair, %path, candidates = paths.len(), "granted path");
            demand.grant(path.clone());
            queue.push_back(id);
        }

        let outcome = ScheduleOutcome { demands, rounds };
        info!(
            demands = outcome.demands.len(),
            rounds,
            paths = outcome.total_paths(),
            score = ?outcome.score(),
            "scheduling complete"
        );
        Ok(outcome)
    }
}
