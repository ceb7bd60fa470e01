//! Cache health handler

use axum::{extract::State, Json};
use ladder_service::dto::CacheHealthResponse;
use ladder_service::CacheHealthService;

use crate::response::ApiResult;
use crate::state::AppState;

/// GET /cache/health
pub async fn get_cache_health(State(state): State<AppState>) -> ApiResult<Json<CacheHealthResponse>> {
    let service = CacheHealthService::new(state.service_context());
    let response = service.report().await?;
    Ok(Json(response))
}
