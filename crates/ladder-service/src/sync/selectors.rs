//! Candidate selectors - which players each phase resyncs

use chrono::{DateTime, Utc};
use ladder_common::SyncSettings;
use ladder_core::entities::{window_cutoff, Candidate, STALENESS_WINDOW};
use tracing::{debug, instrument};

use super::phase::SyncPhase;
use crate::services::{ServiceContext, ServiceResult};

/// Page size of the new-account selector
pub const NEW_ACCOUNT_PAGE_SIZE: i64 = 50;

/// Runs the selector query behind each phase
pub struct CandidateSelector<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Select the candidates for one phase, in processing order
    #[instrument(skip(self, settings))]
    pub async fn select(
        &self,
        phase: SyncPhase,
        settings: &SyncSettings,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Candidate>> {
        let season = self.ctx.season();
        let candidates = match phase {
            SyncPhase::NewAccounts => {
                let since = window_cutoff(now, self.ctx.new_account_window());
                self.ctx
                    .account_repo()
                    .find_uncached_recent(season, since, NEW_ACCOUNT_PAGE_SIZE)
                    .await?
            }
            SyncPhase::GroupMembers => {
                self.ctx
                    .account_repo()
                    .find_uncached_group_members(season)
                    .await?
            }
            SyncPhase::StaleRows => {
                let stale_before = window_cutoff(now, STALENESS_WINDOW);
                let limit = i64::try_from(settings.stale_batch_size).unwrap_or(i64::MAX);
                self.ctx
                    .cache_repo()
                    .find_stale(season, stale_before, limit)
                    .await?
            }
        };

        debug!(%phase, count = candidates.len(), "Selected candidates");
        Ok(candidates)
    }
}
