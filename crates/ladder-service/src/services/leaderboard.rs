//! Leaderboard service
//!
//! Ranks cached rows of the active season by the chosen mode's rating.

use ladder_core::entities::LeaderboardMode;
use tracing::instrument;

use crate::dto::{LeaderboardEntry, LeaderboardResponse, PageMeta};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

pub struct LeaderboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaderboardService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of the leaderboard. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn page(
        &self,
        mode: LeaderboardMode,
        page: i64,
        limit: i64,
    ) -> ServiceResult<LeaderboardResponse> {
        if page < 1 {
            return Err(ServiceError::validation("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ServiceError::validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| ServiceError::validation("page is out of range"))?;
        let season = self.ctx.season();
        let result = self
            .ctx
            .cache_repo()
            .leaderboard(season, mode, limit, offset)
            .await?;

        let has_more = offset + (result.rows.len() as i64) < result.total;
        let data = result
            .rows
            .into_iter()
            .zip(offset + 1..)
            .map(|(stat, rank)| LeaderboardEntry::new(rank, mode, stat))
            .collect();

        Ok(LeaderboardResponse {
            mode,
            season,
            data,
            pagination: PageMeta {
                page,
                limit,
                total: result.total,
                has_more,
            },
        })
    }
}
