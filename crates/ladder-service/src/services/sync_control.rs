//! Sync control service
//!
//! Force-run, status and runtime settings for the background sync.

use ladder_common::{SyncSettings, SyncSettingsPatch};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{SyncStatusResponse, UpdateSyncSettingsRequest};
use crate::sync::{CycleReport, SyncPipeline};

use super::error::{ServiceError, ServiceResult};

pub struct SyncControlService<'a> {
    pipeline: &'a SyncPipeline,
}

impl<'a> SyncControlService<'a> {
    pub fn new(pipeline: &'a SyncPipeline) -> Self {
        Self { pipeline }
    }

    /// Settings, run state, last report and cache health.
    ///
    /// A failing health query is reported inside the response instead of
    /// failing the whole status call.
    #[instrument(skip(self))]
    pub async fn status(&self) -> SyncStatusResponse {
        let ctx = self.pipeline.context();
        let (cache_health, cache_health_error) =
            match ctx.cache_repo().health_snapshot(ctx.season()).await {
                Ok(health) => (Some(health), None),
                Err(e) => {
                    warn!(error = %e, "Cache health query failed");
                    (None, Some(e.to_string()))
                }
            };

        SyncStatusResponse {
            running: self.pipeline.is_running(),
            season: ctx.season(),
            settings: ctx.settings().snapshot(),
            last_cycle: self.pipeline.last_report(),
            cache_health,
            cache_health_error,
        }
    }

    /// Run one cycle now, regardless of the enabled flag, and wait for it.
    ///
    /// The cycle runs on its own task. If the caller stops waiting the cycle
    /// still finishes, and its report shows up in [`Self::status`].
    ///
    /// # Errors
    /// Returns `ServiceError::Conflict` if a cycle is already running.
    #[instrument(skip(self))]
    pub async fn run_now(&self) -> ServiceResult<CycleReport> {
        info!("Forced sync cycle requested");
        let cycle = self.pipeline.spawn_cycle()?;
        cycle
            .await
            .map_err(|e| ServiceError::internal(format!("sync cycle task failed: {e}")))
    }

    /// Validate and apply a partial settings update
    #[instrument(skip(self, request))]
    pub fn update_settings(&self, request: UpdateSyncSettingsRequest) -> ServiceResult<SyncSettings> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let patch = SyncSettingsPatch::from(request);
        if patch.is_empty() {
            return Err(ServiceError::validation("no settings to update"));
        }

        let updated = self.pipeline.context().settings().update(&patch)?;
        info!(?updated, "Sync settings updated");
        Ok(updated)
    }
}
