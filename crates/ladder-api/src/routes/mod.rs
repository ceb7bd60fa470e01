//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes live at the root.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{cache, health, leaderboard, players, sync};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(sync_routes())
        .merge(read_routes())
}

/// Sync control surface
fn sync_routes() -> Router<AppState> {
    Router::new()
        .route("/sync/status", get(sync::get_status))
        .route("/sync/run", post(sync::run_now))
        .route("/sync/settings", patch(sync::update_settings))
}

/// Read endpoints over the player cache
fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/cache/health", get(cache::get_cache_health))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/players/:player_id", get(players::get_player))
}
