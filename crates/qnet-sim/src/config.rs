//! Configuration types for simulation runs and sweeps.

use qnet_routing::SdPairConfig;
use qnet_topology::TopologyConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for deterministic runs; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Node-count range and degree floor
    pub topology: TopologyConfig,
    /// Smallest per-node qubit budget (inclusive)
    pub min_qubits: usize,
    /// Largest per-node qubit budget (inclusive)
    pub max_qubits: usize,
    /// Number of demands to draw
    pub num_pairs: usize,
    /// Demand sampling rules
    pub pair_config: SdPairConfig,
    /// Treat isolated nodes in the capacity graph as a failed trial
    pub require_connected: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            topology: TopologyConfig::default(),
            min_qubits: 2,
            max_qubits: 6,
            num_pairs: 1,
            pair_config: SdPairConfig::default(),
            require_connected: true,
        }
    }
}

/// Configuration for a sweep over network sizes.
///
/// Path enumeration is exhaustive, so cost grows factorially with the
/// density of the capacity graph. Keep sizes to a dozen or so nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// First network size
    pub start: usize,
    /// Sizes stop before this value
    pub stop: usize,
    /// Size increment
    pub step: usize,
    /// Qubit floor; each size `n` draws budgets from `[min_qubits, max(n, min_qubits)]`
    pub min_qubits: usize,
    /// Demands per trial
    pub num_pairs: usize,
    /// Extra attempts per size after a transient failure
    pub max_retries: usize,
    /// Seed for the sweep's generator; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Demand sampling rules
    pub pair_config: SdPairConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: 6,
            stop: 14,
            step: 2,
            min_qubits: 9,
            num_pairs: 1,
            max_retries: 5,
            seed: None,
            pair_config: SdPairConfig::default(),
        }
    }
}

impl SweepConfig {
    /// Network sizes the sweep visits.
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..self.stop).step_by(self.step.max(1))
    }

    /// Run configuration for one size, seeded with `seed`.
    pub fn trial_config(&self, nodes: usize, seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            topology: TopologyConfig::fixed(nodes),
            min_qubits: self.min_qubits,
            max_qubits: nodes.max(self.min_qubits),
            num_pairs: self.num_pairs,
            pair_config: self.pair_config.clone(),
            require_connected: true,
        }
    }
}
