//! Per-trial aggregates handed to reporting collaborators.

use qnet_entanglement::CapacityStats;
use qnet_routing::ScheduleOutcome;
use serde::{Deserialize, Serialize};

/// Aggregates of one completed trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    pub num_nodes: usize,
    pub num_sd_pairs: usize,
    pub min_qubits_assigned: usize,
    pub max_qubits_assigned: usize,
    pub min_entangled_qubits: usize,
    pub max_entangled_qubits: usize,
    /// Scheduling score: fewest paths granted to any demand
    pub k: usize,
    pub total_paths: usize,
    pub rounds: usize,
}

impl TrialReport {
    pub(crate) fn new(num_nodes: usize, stats: CapacityStats, outcome: &ScheduleOutcome, k: usize) -> Self {
        Self {
            num_nodes,
            num_sd_pairs: outcome.demands().len(),
            min_qubits_assigned: stats.min_capacity,
            max_qubits_assigned: stats.max_capacity,
            min_entangled_qubits: stats.min_occupied,
            max_entangled_qubits: stats.max_occupied,
            k,
            total_paths: outcome.total_paths(),
            rounds: outcome.rounds(),
        }
    }
}

/// One size of a sweep: the report or the error that ended it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub nodes: usize,
    /// Trials run for this size, including the final one
    pub attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<TrialReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
