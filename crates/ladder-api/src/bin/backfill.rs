//! One-shot cache backfill
//!
//! Runs a single sync cycle (or one phase) against the configured database
//! and exits. Per-player failures are reported but do not change the exit
//! status; only configuration or connection failures do.
//!
//! ```bash
//! BACKFILL_PHASE=stale BACKFILL_MAX_ITEMS=200 cargo run -p ladder-api --bin ladder-backfill
//! ```

use std::env;

use anyhow::Context;
use ladder_api::server::{connect_database, create_service_context};
use ladder_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use ladder_service::{PhaseOutcome, SyncPhase, SyncPipeline};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let _ = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env));

    let phases = match env::var("BACKFILL_PHASE").ok().filter(|v| !v.trim().is_empty()) {
        Some(raw) => vec![raw
            .parse::<SyncPhase>()
            .context("invalid BACKFILL_PHASE")?],
        None => SyncPhase::ALL.to_vec(),
    };

    let mut settings = config.sync.settings.clone();
    if let Some(raw) = env::var("BACKFILL_MAX_ITEMS").ok().filter(|v| !v.trim().is_empty()) {
        settings.max_items = raw
            .trim()
            .parse()
            .context("BACKFILL_MAX_ITEMS must be a positive integer")?;
    }
    settings
        .validate()
        .context("invalid backfill settings")?;

    let pool = connect_database(&config)
        .await
        .context("failed to connect to the database")?;
    let ctx = create_service_context(&config, &pool).context("failed to build services")?;
    let pipeline = SyncPipeline::new(ctx);

    info!(
        phases = ?phases,
        max_items = settings.max_items,
        season = config.sync.season_id,
        "Starting backfill"
    );

    // A fresh pipeline cannot be busy
    let report = pipeline
        .run_with(&settings, &phases)
        .await
        .context("backfill cycle did not start")?;

    for phase in &report.phases {
        match &phase.outcome {
            PhaseOutcome::Completed { result } => info!(
                phase = %phase.phase,
                selected = phase.selected,
                succeeded = result.success_count,
                failed = result.failure_count,
                "Phase finished"
            ),
            PhaseOutcome::SelectorFailed { error } => {
                warn!(phase = %phase.phase, error = %error, "Phase selector failed");
            }
        }
    }

    info!(
        succeeded = report.success_count(),
        failed = report.failure_count(),
        duration_ms = report.duration_ms,
        "Backfill finished"
    );

    Ok(())
}
