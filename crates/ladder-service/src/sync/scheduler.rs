//! Background scheduler
//!
//! Runs a cycle, sleeps for the configured interval measured from the end of
//! that cycle, and repeats until shutdown. Settings are re-read every
//! iteration so runtime changes apply from the next cycle on.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::pipeline::SyncPipeline;
use crate::services::ServiceError;

pub struct Scheduler {
    pipeline: SyncPipeline,
    initial_delay: Duration,
}

impl Scheduler {
    pub fn new(pipeline: SyncPipeline, initial_delay: Duration) -> Self {
        Self {
            pipeline,
            initial_delay,
        }
    }

    /// Start the loop on the runtime. It ends when `shutdown` fires or closes.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        info!(initial_delay_secs = self.initial_delay.as_secs(), "Sync scheduler started");

        tokio::select! {
            _ = tokio::time::sleep(self.initial_delay) => {}
            _ = shutdown.recv() => {
                info!("Sync scheduler stopped before first cycle");
                return;
            }
        }

        loop {
            let settings = self.pipeline.context().settings().snapshot();

            if settings.enabled {
                self.tick().await;
            } else {
                info!("Sync disabled, skipping cycle");
            }

            // Interval may have changed while the cycle ran
            let interval = self.pipeline.context().settings().snapshot().interval();
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.recv() => {
                    info!("Sync scheduler shutting down");
                    break;
                }
            }
        }
    }

    async fn tick(&self) {
        match self.pipeline.run_cycle().await {
            Ok(report) => info!(
                succeeded = report.success_count(),
                failed = report.failure_count(),
                failed_phases = report.failed_phases(),
                duration_ms = report.duration_ms,
                "Sync cycle finished"
            ),
            Err(ServiceError::Conflict(_)) => {
                warn!("Sync cycle already running, skipping scheduled run");
            }
            Err(e) => error!(error = %e, "Sync cycle failed"),
        }
    }
}
