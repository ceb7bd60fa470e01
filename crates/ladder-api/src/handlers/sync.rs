//! Sync control surface handlers
//!
//! Status is public; force-run and settings changes need the admin token.

use axum::{extract::State, Json};
use ladder_common::SyncSettings;
use ladder_service::dto::{SyncStatusResponse, UpdateSyncSettingsRequest};
use ladder_service::{CycleReport, SyncControlService};

use crate::extractors::{AdminAuth, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Current settings, run state, last cycle and cache health
///
/// GET /sync/status
pub async fn get_status(State(state): State<AppState>) -> Json<SyncStatusResponse> {
    let service = SyncControlService::new(state.pipeline());
    Json(service.status().await)
}

/// Run one cycle now and wait for its report
///
/// If the request times out or the client goes away, the cycle keeps running
/// and its report appears under `last_cycle` in the status.
///
/// POST /sync/run
pub async fn run_now(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> ApiResult<Json<CycleReport>> {
    let service = SyncControlService::new(state.pipeline());
    let report = service.run_now().await?;
    Ok(Json(report))
}

/// Update runtime settings; absent fields keep their value
///
/// PATCH /sync/settings
pub async fn update_settings(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ValidatedJson(request): ValidatedJson<UpdateSyncSettingsRequest>,
) -> ApiResult<Json<SyncSettings>> {
    let service = SyncControlService::new(state.pipeline());
    let settings = service.update_settings(request)?;
    Ok(Json(settings))
}
