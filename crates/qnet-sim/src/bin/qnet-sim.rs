//! QNet size sweep
//!
//! Runs one routing trial per network size and prints a JSON line per size.
//!
//! Usage: `qnet-sim [start] [stop] [step] [seed]`

use std::env;

use qnet_sim::{Sweep, SweepConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let defaults = SweepConfig::default();

    let config = SweepConfig {
        start: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(defaults.start),
        stop: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.stop),
        step: args.get(3).and_then(|s| s.parse().ok()).unwrap_or(defaults.step),
        seed: args.get(4).and_then(|s| s.parse().ok()),
        ..defaults
    };

    tracing::info!(
        start = config.start,
        stop = config.stop,
        step = config.step,
        seed = ?config.seed,
        "starting sweep"
    );

    let mut write_error = None;
    let records = Sweep::new(config).run_with(|record| {
        if write_error.is_some() {
            return;
        }
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(err) => write_error = Some(err),
        }
    });
    if let Some(err) = write_error {
        return Err(err.into());
    }

    let failed = records.iter().filter(|r| r.error.is_some()).count();
    tracing::info!(sizes = records.len(), failed, "sweep complete");
    Ok(())
}
