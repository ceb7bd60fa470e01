//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use ladder_common::SyncSettings;
use ladder_core::entities::{
    CacheHealth, CachedPlayerStat, LeaderboardMode, StaleReason, STALENESS_WINDOW,
};
use ladder_core::value_objects::{PlayerId, RankTier, SeasonId};
use serde::Serialize;

use crate::sync::CycleReport;

// ============================================================================
// Player Responses
// ============================================================================

/// One cached player row
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatResponse {
    pub player_id: PlayerId,
    pub season: SeasonId,
    pub display_name: String,
    pub tier: RankTier,
    pub tier_ordinal: u8,
    pub solo_rating: Option<i32>,
    pub solo_elo: Option<i32>,
    pub solo_wins: i32,
    pub solo_matches: i32,
    pub team_rating: Option<i32>,
    pub team_wins: i32,
    pub team_matches: i32,
    pub avatar_url: Option<String>,
    pub group_tag: Option<String>,
    pub region: Option<String>,
    pub faction: Option<String>,
    pub last_solo_match_at: Option<DateTime<Utc>>,
    pub last_team_match_at: Option<DateTime<Utc>>,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Why the next stale pass would pick this row, if it would
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_reason: Option<StaleReason>,
}

impl PlayerStatResponse {
    pub fn from_stat(stat: CachedPlayerStat, now: DateTime<Utc>) -> Self {
        let stale_reason = stat.stale_reason(now, STALENESS_WINDOW);
        Self {
            tier_ordinal: stat.tier.ordinal(),
            tier: stat.tier,
            player_id: stat.player_id,
            season: stat.season,
            display_name: stat.display_name,
            solo_rating: stat.solo_rating,
            solo_elo: stat.solo_elo,
            solo_wins: stat.solo_wins,
            solo_matches: stat.solo_matches,
            team_rating: stat.team_rating,
            team_wins: stat.team_wins,
            team_matches: stat.team_matches,
            avatar_url: stat.avatar_url,
            group_tag: stat.group_tag,
            region: stat.region,
            faction: stat.faction,
            last_solo_match_at: stat.last_solo_match_at,
            last_team_match_at: stat.last_team_match_at,
            refreshed_at: stat.refreshed_at,
            stale_reason,
        }
    }
}

// ============================================================================
// Leaderboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub player_id: PlayerId,
    pub display_name: String,
    pub rating: Option<i32>,
    pub wins: i32,
    pub matches: i32,
    pub tier: RankTier,
    pub avatar_url: Option<String>,
    pub group_tag: Option<String>,
    pub region: Option<String>,
}

impl LeaderboardEntry {
    pub fn new(rank: i64, mode: LeaderboardMode, stat: CachedPlayerStat) -> Self {
        let (rating, wins, matches) = match mode {
            LeaderboardMode::Solo => (stat.solo_rating, stat.solo_wins, stat.solo_matches),
            LeaderboardMode::Team => (stat.team_rating, stat.team_wins, stat.team_matches),
        };
        Self {
            rank,
            player_id: stat.player_id,
            display_name: stat.display_name,
            rating,
            wins,
            matches,
            tier: stat.tier,
            avatar_url: stat.avatar_url,
            group_tag: stat.group_tag,
            region: stat.region,
        }
    }
}

/// Offset pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub mode: LeaderboardMode,
    pub season: SeasonId,
    pub data: Vec<LeaderboardEntry>,
    pub pagination: PageMeta,
}

// ============================================================================
// Cache & Sync Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CacheHealthResponse {
    pub season: SeasonId,
    #[serde(flatten)]
    pub health: CacheHealth,
    pub generated_at: DateTime<Utc>,
}

impl CacheHealthResponse {
    pub fn new(season: SeasonId, health: CacheHealth) -> Self {
        Self {
            season,
            health,
            generated_at: Utc::now(),
        }
    }
}

/// Everything the control surface reports about the sync
#[derive(Debug, Clone, Serialize)]
pub struct SyncStatusResponse {
    pub running: bool,
    pub season: SeasonId,
    pub settings: SyncSettings,
    pub last_cycle: Option<CycleReport>,
    pub cache_health: Option<CacheHealth>,
    /// Set when the health query failed; the rest of the status is still valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_health_error: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
