//! PostgreSQL implementation of PlayerCacheRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use ladder_core::entities::{
    CacheHealth, CachedPlayerStat, Candidate, LeaderboardMode, FRESH_WINDOW, STALENESS_WINDOW,
};
use ladder_core::traits::{LeaderboardPage, PlayerCacheRepository, RepoResult};
use ladder_core::value_objects::{PlayerId, SeasonId};

use crate::mappers::{health_from_model, stale_candidate, PlayerCacheUpsert};
use crate::models::{CacheHealthModel, PlayerCacheModel, StaleRowModel};

use super::error::{map_db_error, skip_invalid_row};

const UPSERT_SQL: &str = r"
    INSERT INTO player_cache (
        player_id, season_id, display_name,
        solo_rating, solo_elo, solo_wins, solo_matches,
        team_rating, team_wins, team_matches,
        tier, avatar_url, group_tag, region, faction,
        last_solo_match_at, last_team_match_at, refreshed_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, NOW())
    ON CONFLICT (player_id, season_id) DO UPDATE SET
        display_name = EXCLUDED.display_name,
        solo_rating = EXCLUDED.solo_rating,
        solo_elo = EXCLUDED.solo_elo,
        solo_wins = EXCLUDED.solo_wins,
        solo_matches = EXCLUDED.solo_matches,
        team_rating = EXCLUDED.team_rating,
        team_wins = EXCLUDED.team_wins,
        team_matches = EXCLUDED.team_matches,
        tier = EXCLUDED.tier,
        avatar_url = COALESCE(EXCLUDED.avatar_url, player_cache.avatar_url),
        group_tag = EXCLUDED.group_tag,
        region = EXCLUDED.region,
        faction = EXCLUDED.faction,
        last_solo_match_at = EXCLUDED.last_solo_match_at,
        last_team_match_at = EXCLUDED.last_team_match_at,
        refreshed_at = NOW()
    RETURNING player_id, season_id, display_name, solo_rating, solo_elo, solo_wins, solo_matches,
              team_rating, team_wins, team_matches, tier, avatar_url, group_tag, region, faction,
              last_solo_match_at, last_team_match_at, refreshed_at
";

/// Priority classes, most urgent first; see `StaleReason::priority`
const STALE_SQL: &str = r"
    SELECT player_id,
           CASE
               WHEN refreshed_at IS NULL THEN 1
               WHEN solo_elo IS NULL OR solo_elo = 0 THEN 2
               WHEN solo_elo = solo_rating THEN 3
               WHEN avatar_url IS NULL THEN 4
               WHEN group_tag IS NULL THEN 5
               ELSE 6
           END AS priority,
           refreshed_at
    FROM player_cache
    WHERE season_id = $1
      AND (
          refreshed_at IS NULL
          OR refreshed_at < $2
          OR solo_rating IS NULL
          OR solo_rating = 0
          OR solo_elo IS NULL
          OR solo_elo = 0
          OR solo_elo = solo_rating
          OR team_rating IS NULL
          OR group_tag IS NULL
          OR region IS NULL
          OR faction IS NULL
          OR avatar_url IS NULL
          OR last_solo_match_at IS NULL
          OR last_team_match_at IS NULL
      )
    ORDER BY priority ASC, refreshed_at ASC NULLS FIRST, player_id ASC
    LIMIT $3
";

const HEALTH_SQL: &str = r"
    SELECT COUNT(*) AS total,
           COUNT(*) FILTER (WHERE refreshed_at >= $2) AS fresh,
           COUNT(*) FILTER (WHERE refreshed_at IS NULL OR refreshed_at < $3) AS needs_refresh,
           COUNT(*) FILTER (WHERE solo_elo IS NULL OR solo_elo = 0) AS missing_elo,
           COUNT(*) FILTER (WHERE solo_elo = solo_rating) AS anomalous_elo,
           COUNT(*) FILTER (WHERE avatar_url IS NULL) AS missing_avatar,
           COUNT(*) FILTER (WHERE group_tag IS NULL) AS missing_group_tag,
           AVG(EXTRACT(EPOCH FROM ($4 - refreshed_at)))::float8 AS avg_age_seconds
    FROM player_cache
    WHERE season_id = $1
";

const SOLO_LEADERBOARD_SQL: &str = r"
    SELECT player_id, season_id, display_name, solo_rating, solo_elo, solo_wins, solo_matches,
           team_rating, team_wins, team_matches, tier, avatar_url, group_tag, region, faction,
           last_solo_match_at, last_team_match_at, refreshed_at
    FROM player_cache
    WHERE season_id = $1 AND solo_matches > 0 AND solo_rating IS NOT NULL
    ORDER BY solo_rating DESC, solo_wins DESC, player_id ASC
    LIMIT $2 OFFSET $3
";

const TEAM_LEADERBOARD_SQL: &str = r"
    SELECT player_id, season_id, display_name, solo_rating, solo_elo, solo_wins, solo_matches,
           team_rating, team_wins, team_matches, tier, avatar_url, group_tag, region, faction,
           last_solo_match_at, last_team_match_at, refreshed_at
    FROM player_cache
    WHERE season_id = $1 AND team_matches > 0 AND team_rating IS NOT NULL
    ORDER BY team_rating DESC, team_wins DESC, player_id ASC
    LIMIT $2 OFFSET $3
";

const SOLO_COUNT_SQL: &str = r"
    SELECT COUNT(*) FROM player_cache
    WHERE season_id = $1 AND solo_matches > 0 AND solo_rating IS NOT NULL
";

const TEAM_COUNT_SQL: &str = r"
    SELECT COUNT(*) FROM player_cache
    WHERE season_id = $1 AND team_matches > 0 AND team_rating IS NOT NULL
";

/// PostgreSQL implementation of PlayerCacheRepository
#[derive(Clone)]
pub struct PgPlayerCacheRepository {
    pool: PgPool,
}

impl PgPlayerCacheRepository {
    /// Create a new PgPlayerCacheRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerCacheRepository for PgPlayerCacheRepository {
    #[instrument(skip(self, stat), fields(player_id = %stat.player_id, season = %stat.season))]
    async fn upsert(&self, stat: &CachedPlayerStat) -> RepoResult<CachedPlayerStat> {
        let row = PlayerCacheUpsert::new(stat);

        let stored = sqlx::query_as::<_, PlayerCacheModel>(UPSERT_SQL)
            .bind(row.player_id)
            .bind(row.season_id)
            .bind(row.display_name)
            .bind(row.solo_rating)
            .bind(row.solo_elo)
            .bind(row.solo_wins)
            .bind(row.solo_matches)
            .bind(row.team_rating)
            .bind(row.team_wins)
            .bind(row.team_matches)
            .bind(row.tier)
            .bind(row.avatar_url)
            .bind(row.group_tag)
            .bind(row.region)
            .bind(row.faction)
            .bind(row.last_solo_match_at)
            .bind(row.last_team_match_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        CachedPlayerStat::try_from(stored)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        player_id: &PlayerId,
        season: SeasonId,
    ) -> RepoResult<Option<CachedPlayerStat>> {
        let result = sqlx::query_as::<_, PlayerCacheModel>(
            r"
            SELECT player_id, season_id, display_name, solo_rating, solo_elo, solo_wins, solo_matches,
                   team_rating, team_wins, team_matches, tier, avatar_url, group_tag, region, faction,
                   last_solo_match_at, last_team_match_at, refreshed_at
            FROM player_cache
            WHERE player_id = $1 AND season_id = $2
            ",
        )
        .bind(player_id.as_str())
        .bind(season.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(CachedPlayerStat::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_stale(
        &self,
        season: SeasonId,
        stale_before: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, StaleRowModel>(STALE_SQL)
            .bind(season.into_inner())
            .bind(stale_before)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().filter_map(stale_candidate).collect())
    }

    #[instrument(skip(self))]
    async fn health_snapshot(&self, season: SeasonId) -> RepoResult<CacheHealth> {
        let now = Utc::now();

        let model = sqlx::query_as::<_, CacheHealthModel>(HEALTH_SQL)
            .bind(season.into_inner())
            .bind(ladder_core::window_cutoff(now, FRESH_WINDOW))
            .bind(ladder_core::window_cutoff(now, STALENESS_WINDOW))
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(health_from_model(model))
    }

    #[instrument(skip(self))]
    async fn leaderboard(
        &self,
        season: SeasonId,
        mode: LeaderboardMode,
        limit: i64,
        offset: i64,
    ) -> RepoResult<LeaderboardPage> {
        let (rows_sql, count_sql) = match mode {
            LeaderboardMode::Solo => (SOLO_LEADERBOARD_SQL, SOLO_COUNT_SQL),
            LeaderboardMode::Team => (TEAM_LEADERBOARD_SQL, TEAM_COUNT_SQL),
        };

        let total = sqlx::query_scalar::<_, i64>(count_sql)
            .bind(season.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, PlayerCacheModel>(rows_sql)
            .bind(season.into_inner())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(LeaderboardPage {
            rows: rows
                .into_iter()
                .map(CachedPlayerStat::try_from)
                .filter_map(skip_invalid_row)
                .collect(),
            total,
        })
    }
}
