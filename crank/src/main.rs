//! Zeta Crank binary.
//!
//! Loads a snapshot, a work description and a configuration, then logs the
//! planned maintenance transactions.

use std::env;
use std::fs;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeta_crank::{CrankConfig, MaintenancePlanner, MaintenanceWork};
use zeta_sdk::ExchangeSnapshot;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zeta_crank=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let snapshot_path =
        env::var("ZETA_SNAPSHOT_PATH").unwrap_or_else(|_| "snapshot.json".to_string());
    let work_path = env::var("ZETA_WORK_PATH").unwrap_or_else(|_| "work.json".to_string());

    let config = match env::var("ZETA_CRANK_CONFIG") {
        Ok(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading crank config {path}"))?;
            CrankConfig::from_json(&json)?
        }
        Err(_) => CrankConfig::default(),
    };

    let snapshot_json = fs::read_to_string(&snapshot_path)
        .with_context(|| format!("reading snapshot {snapshot_path}"))?;
    let snapshot = ExchangeSnapshot::from_json(&snapshot_json)?;
    snapshot.validate()?;

    let work_json = fs::read_to_string(&work_path)
        .with_context(|| format!("reading work {work_path}"))?;
    let work = MaintenanceWork::from_json(&work_json)?;

    tracing::info!("Starting Zeta crank planner");
    tracing::info!("Network: {:?}", snapshot.network.network);
    tracing::info!("Assets: {}", config.assets.join(", "));

    let planner = MaintenancePlanner::new(&snapshot, config)?;
    let planned = planner.plan(&work)?;

    for (i, tx) in planned.iter().enumerate() {
        tracing::info!(
            index = i,
            instructions = tx.instructions.len(),
            remaining_accounts = tx.remaining_accounts,
            "{}",
            tx.label
        );
    }

    let metrics = planner.metrics().snapshot();
    tracing::info!(
        transactions = metrics.transactions_planned,
        instructions = metrics.instructions_planned,
        remaining_accounts = metrics.remaining_accounts,
        skipped = metrics.work_skipped,
        "Planning complete"
    );

    Ok(())
}
