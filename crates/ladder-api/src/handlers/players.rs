//! Player handlers

use axum::{
    extract::{Path, State},
    Json,
};
use ladder_service::dto::PlayerStatResponse;
use ladder_service::PlayerService;

use crate::response::ApiResult;
use crate::state::AppState;

/// One cached player row for the active season
///
/// GET /players/{player_id}
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> ApiResult<Json<PlayerStatResponse>> {
    let service = PlayerService::new(state.service_context());
    let response = service.get(&player_id).await?;
    Ok(Json(response))
}
