//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use ladder_core::entities::Candidate;
use ladder_core::traits::{AccountRepository, RepoResult};
use ladder_core::value_objects::{PlayerId, SeasonId};

use crate::mappers::{account_candidate, group_member_candidate};
use crate::models::{GroupMemberCandidateModel, UncachedAccountModel};

use super::error::map_db_error;

/// PostgreSQL implementation of AccountRepository
///
/// Read-only: accounts, groups and memberships are owned elsewhere.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_uncached_recent(
        &self,
        season: SeasonId,
        since: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, UncachedAccountModel>(
            r"
            SELECT a.id, a.external_account_ref, btrim(a.remote_stats_id) AS remote_stats_id, a.created_at
            FROM accounts a
            WHERE a.remote_stats_id IS NOT NULL
              AND btrim(a.remote_stats_id) <> ''
              AND btrim(a.remote_stats_id) NOT LIKE 'temp\_%'
              AND a.created_at >= $2
              AND NOT EXISTS (
                  SELECT 1 FROM player_cache pc
                  WHERE pc.player_id = btrim(a.remote_stats_id) AND pc.season_id = $1
              )
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $3
            ",
        )
        .bind(season.into_inner())
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().filter_map(account_candidate).collect())
    }

    #[instrument(skip(self))]
    async fn find_uncached_group_members(&self, season: SeasonId) -> RepoResult<Vec<Candidate>> {
        // One row per remote id; a tagged group wins over an untagged one
        let rows = sqlx::query_as::<_, GroupMemberCandidateModel>(
            r"
            SELECT DISTINCT ON (btrim(a.remote_stats_id))
                   btrim(a.remote_stats_id) AS remote_stats_id,
                   g.id AS group_id,
                   g.tag AS group_tag
            FROM group_members gm
            JOIN groups g ON g.id = gm.group_id
            JOIN accounts a ON a.external_account_ref = gm.external_account_ref
            WHERE a.remote_stats_id IS NOT NULL
              AND btrim(a.remote_stats_id) <> ''
              AND btrim(a.remote_stats_id) NOT LIKE 'temp\_%'
              AND NOT EXISTS (
                  SELECT 1 FROM player_cache pc
                  WHERE pc.player_id = btrim(a.remote_stats_id) AND pc.season_id = $1
              )
            ORDER BY btrim(a.remote_stats_id), (g.tag IS NULL), g.id
            ",
        )
        .bind(season.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().filter_map(group_member_candidate).collect())
    }

    #[instrument(skip(self))]
    async fn group_tag_for(&self, player_id: &PlayerId) -> RepoResult<Option<String>> {
        let tag = sqlx::query_scalar::<_, String>(
            r"
            SELECT g.tag
            FROM accounts a
            JOIN group_members gm ON gm.external_account_ref = a.external_account_ref
            JOIN groups g ON g.id = gm.group_id
            WHERE btrim(a.remote_stats_id) = $1
              AND g.tag IS NOT NULL
              AND btrim(g.tag) <> ''
            ORDER BY g.id
            LIMIT 1
            ",
        )
        .bind(player_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(tag)
    }
}
