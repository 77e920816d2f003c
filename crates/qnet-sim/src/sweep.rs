//! Sweep over network sizes with per-kind retry.
//!
//! Each size runs one trial. A transient failure (see
//! [`TrialError::is_transient`]) is retried with a fresh seed up to
//! `max_retries` times; any other failure is recorded and the sweep moves on.

use rand::Rng;
use tracing::{error, info, warn};

use crate::simulation::seeded_rng;
use crate::{run, SweepConfig, SweepRecord, TrialError, TrialReport};

/// Drives trials over a range of network sizes.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    config: SweepConfig,
}

impl Sweep {
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run every size, calling `on_record` as each one finishes.
    pub fn run_with<F: FnMut(&SweepRecord)>(&self, mut on_record: F) -> Vec<SweepRecord> {
        let mut rng = seeded_rng(self.config.seed);
        let mut records = Vec::new();

        for nodes in self.config.sizes() {
            let (attempts, result) = self.run_size(nodes, || rng.gen());
            let record = match result {
                Ok(report) => SweepRecord {
                    nodes,
                    attempts,
                    report: Some(report),
                    error: None,
                },
                Err(err) => SweepRecord {
                    nodes,
                    attempts,
                    report: None,
                    error: Some(err.to_string()),
                },
            };
            on_record(&record);
            records.push(record);
        }
        records
    }

    /// Run every size and collect the records.
    pub fn run(&self) -> Vec<SweepRecord> {
        self.run_with(|_| {})
    }

    /// Trials for one size until success, a permanent error, or retries run out.
    fn run_size<S: FnMut() -> u64>(&self, nodes: usize, mut next_seed: S) -> (usize, Result<TrialReport, TrialError>) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let seed = next_seed();
            match run(self.config.trial_config(nodes, seed)) {
                Ok(report) => {
                    info!(nodes, attempts, k = report.k, "size complete");
                    return (attempts, Ok(report));
                }
                Err(err) if err.is_transient() && attempts <= self.config.max_retries => {
                    warn!(nodes, attempts, seed, stage = err.stage(), %err, "transient failure, retrying");
                }
                Err(err) => {
                    error!(nodes, attempts, seed, stage = err.stage(), %err, "size failed");
                    return (attempts, Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> SweepConfig {
        SweepConfig {
            start: 5,
            stop: 9,
            step: 1,
            min_qubits: 3,
            seed: Some(seed),
            ..SweepConfig::default()
        }
    }

    #[test]
    fn one_record_per_size() {
        let records = Sweep::new(small(8)).run();
        let sizes: Vec<_> = records.iter().map(|r| r.nodes).collect();
        assert_eq!(sizes, vec![5, 6, 7, 8]);

        for record in &records {
            assert!(record.attempts >= 1);
            assert!(record.attempts <= 1 + small(8).max_retries);
            assert_ne!(record.report.is_some(), record.error.is_some());
            if let Some(report) = &record.report {
                assert_eq!(report.num_nodes, record.nodes);
            }
        }
    }

    #[test]
    fn sweep_is_reproducible() {
        assert_eq!(Sweep::new(small(3)).run(), Sweep::new(small(3)).run());
    }

    #[test]
    fn permanent_failure_ends_size() {
        // 2 × 3 demands never fit in 5 or 6 nodes; only disconnection retries
        let config = SweepConfig {
            start: 5,
            stop: 7,
            num_pairs: 3,
            ..small(1)
        };
        let records = Sweep::new(config).run();
        for record in records {
            assert!(record.attempts <= 1 + small(1).max_retries);
            assert!(record.report.is_none());
            let error = record.error.unwrap();
            assert!(
                error.starts_with("no demands generated") || error.starts_with("capacity graph has isolated"),
                "unexpected error: {error}"
            );
        }
    }

    #[test]
    fn callback_sees_every_record() {
        let mut seen = Vec::new();
        let records = Sweep::new(small(2)).run_with(|r| seen.push(r.nodes));
        assert_eq!(seen, records.iter().map(|r| r.nodes).collect::<Vec<_>>());
    }
}
