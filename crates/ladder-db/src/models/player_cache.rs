//! Player cache database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for player_cache table
#[derive(Debug, Clone, FromRow)]
pub struct PlayerCacheModel {
    pub player_id: String,
    pub season_id: i32,
    pub display_name: String,
    pub solo_rating: Option<i32>,
    pub solo_elo: Option<i32>,
    pub solo_wins: i32,
    pub solo_matches: i32,
    pub team_rating: Option<i32>,
    pub team_wins: i32,
    pub team_matches: i32,
    pub tier: String,
    pub avatar_url: Option<String>,
    pub group_tag: Option<String>,
    pub region: Option<String>,
    pub faction: Option<String>,
    pub last_solo_match_at: Option<DateTime<Utc>>,
    pub last_team_match_at: Option<DateTime<Utc>>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Stale-row selector output: player id plus its priority class
#[derive(Debug, Clone, FromRow)]
pub struct StaleRowModel {
    pub player_id: String,
    pub priority: i32,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Single-row result of the cache health aggregate
#[derive(Debug, Clone, FromRow)]
pub struct CacheHealthModel {
    pub total: i64,
    pub fresh: i64,
    pub needs_refresh: i64,
    pub missing_elo: i64,
    pub anomalous_elo: i64,
    pub missing_avatar: i64,
    pub missing_group_tag: i64,
    /// NULL when no row has ever been refreshed
    pub avg_age_seconds: Option<f64>,
}
