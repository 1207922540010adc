//! Runs the emergency dispatch simulation and prints its status.
//!
//! Environment:
//! - `DISPATCH_CONFIG`: path to a JSON [`SimulationConfig`]; defaults apply when unset.
//! - `DISPATCH_RUN_SECS`: stop after this many seconds; runs until killed when unset.
//! - `RUST_LOG`: tracing filter.

use std::time::Duration;

use anyhow::Context;
use emergency_dispatch::config::SimulationConfig;
use emergency_dispatch::core::AppResult;
use emergency_dispatch::runtime::{EmergencySystem, TokioSpawner};
use emergency_dispatch::util::init_tracing;

fn load_config() -> AppResult<SimulationConfig> {
    match std::env::var("DISPATCH_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            SimulationConfig::from_json_str(&raw).with_context(|| format!("loading config {path}"))
        }
        Err(_) => Ok(SimulationConfig::default()),
    }
}

fn run_limit() -> AppResult<Option<Duration>> {
    std::env::var("DISPATCH_RUN_SECS")
        .ok()
        .map(|s| {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("DISPATCH_RUN_SECS must be an integer, got {s:?}"))
        })
        .transpose()
}

async fn run(config: SimulationConfig, limit: Option<Duration>) -> AppResult<()> {
    let period = config.display_period();
    let system = EmergencySystem::start(config, &TokioSpawner::current())?;
    let started = tokio::time::Instant::now();

    loop {
        println!("{}", system.status());
        if limit.is_some_and(|l| started.elapsed() >= l) {
            break;
        }
        tokio::time::sleep(period).await;
    }

    let reports = system.shutdown().await;
    println!("stopped; {} handlers drained", reports.len());
    Ok(())
}

fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = load_config()?;
    let limit = run_limit()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get().max(2))
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(run(config, limit))
}
