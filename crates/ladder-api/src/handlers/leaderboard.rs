//! Leaderboard handler

use axum::{extract::State, Json};
use ladder_service::dto::LeaderboardResponse;
use ladder_service::LeaderboardService;

use crate::extractors::LeaderboardParams;
use crate::response::ApiResult;
use crate::state::AppState;

/// Ranked cached rows of the active season
///
/// GET /leaderboard?mode=solo|team&page&limit
pub async fn get_leaderboard(
    State(state): State<AppState>,
    params: LeaderboardParams,
) -> ApiResult<Json<LeaderboardResponse>> {
    let service = LeaderboardService::new(state.service_context());
    let response = service.page(params.mode, params.page, params.limit).await?;
    Ok(Json(response))
}
