//! QNet Simulation
//!
//! Runs entanglement-constrained routing trials end to end.
//!
//! # Architecture
//!
//! - **Simulation**: owns one run's generator, topology, nodes and capacity
//!   snapshot; each stage returns a tagged [`TrialError`]
//! - **Sweep**: one trial per network size, retrying transient failures only
//! - **Reports**: serializable per-trial aggregates
//!
//! # Usage
//!
//! ```no_run
//! use qnet_sim::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig { seed: Some(42), ..SimulationConfig::default() };
//! let mut sim = Simulation::build(config)?;
//! let report = sim.run_trial()?;
//! println!("k = {}", report.k);
//! # Ok::<(), qnet_sim::TrialError>(())
//! ```

mod config;
mod error;
mod report;
mod simulation;
mod sweep;

pub use config::{SimulationConfig, SweepConfig};
pub use error::{Result, TrialError};
pub use report::{SweepRecord, TrialReport};
pub use simulation::{run, Simulation};
pub use sweep::Sweep;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trial_completes() {
        let config = SimulationConfig {
            seed: Some(2024),
            require_connected: false,
            ..SimulationConfig::default()
        };
        let report = run(config).unwrap();

        assert!((4..=8).contains(&report.num_nodes));
        assert_eq!(report.num_sd_pairs, 1);
        assert!((2..=6).contains(&report.min_qubits_assigned));
        assert!(report.min_entangled_qubits <= report.max_entangled_qubits);
        assert!(report.max_entangled_qubits <= report.max_qubits_assigned);
        assert_eq!(report.k, report.total_paths);
    }
}
