//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation: Postgres for the cache and account tables,
//! HTTP for the remote statistics API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{CacheHealth, CachedPlayerStat, Candidate, LeaderboardMode, PlayerStats};
use crate::error::DomainError;
use crate::value_objects::{PlayerId, SeasonId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// One page of ranked cache rows
#[derive(Debug, Clone, Default)]
pub struct LeaderboardPage {
    pub rows: Vec<CachedPlayerStat>,
    /// Ranked rows in the season, across all pages
    pub total: i64,
}

// ============================================================================
// Player Cache Repository
// ============================================================================

#[async_trait]
pub trait PlayerCacheRepository: Send + Sync {
    /// Insert or merge a row keyed by (player id, season).
    ///
    /// The avatar is coalesced with the stored value and the refresh time is
    /// set by the store. Returns the row as stored.
    async fn upsert(&self, stat: &CachedPlayerStat) -> RepoResult<CachedPlayerStat>;

    /// Find one cached row
    async fn find(&self, player_id: &PlayerId, season: SeasonId)
        -> RepoResult<Option<CachedPlayerStat>>;

    /// Stale or incomplete rows, most urgent first
    async fn find_stale(
        &self,
        season: SeasonId,
        stale_before: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>>;

    /// Aggregate freshness and completeness over one season
    async fn health_snapshot(&self, season: SeasonId) -> RepoResult<CacheHealth>;

    /// Rows with games in `mode`, highest rating first
    async fn leaderboard(
        &self,
        season: SeasonId,
        mode: LeaderboardMode,
        limit: i64,
        offset: i64,
    ) -> RepoResult<LeaderboardPage>;
}

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Linked accounts created since `since` with no cache row, newest first
    async fn find_uncached_recent(
        &self,
        season: SeasonId,
        since: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>>;

    /// Linked group members with no cache row, one per player id
    async fn find_uncached_group_members(&self, season: SeasonId) -> RepoResult<Vec<Candidate>>;

    /// Tag of a group the player belongs to, if any group has one
    async fn group_tag_for(&self, player_id: &PlayerId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Remote Statistics Source
// ============================================================================

#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch and normalize one player's statistics. Never retries.
    async fn fetch_player_stats(&self, player_id: &PlayerId) -> RepoResult<PlayerStats>;
}
