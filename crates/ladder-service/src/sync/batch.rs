//! Batch runner - sequential fetch, classify and upsert over a candidate list
//!
//! Items are processed one at a time in candidate order. A failing item is
//! recorded and never stops the batch; the pause between two fetches is the
//! only outbound rate limiting.

use std::time::Duration;

use chrono::Utc;
use ladder_core::entities::{CachedPlayerStat, Candidate};
use ladder_core::value_objects::PlayerId;
use ladder_core::DomainError;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::services::ServiceContext;

/// Upper bound on per-item outcomes kept in a [`BatchResult`]
pub const MAX_REPORTED_ITEMS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Success,
    Error,
}

/// Outcome of syncing one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub player_id: PlayerId,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ItemOutcome {
    fn success(player_id: PlayerId) -> Self {
        Self {
            player_id,
            status: ItemStatus::Success,
            message: None,
        }
    }

    fn error(player_id: PlayerId, message: String) -> Self {
        Self {
            player_id,
            status: ItemStatus::Error,
            message: Some(message),
        }
    }
}

/// Tally of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub success_count: usize,
    pub failure_count: usize,
    /// First [`MAX_REPORTED_ITEMS`] outcomes in processing order
    pub items: Vec<ItemOutcome>,
}

impl BatchResult {
    pub fn processed(&self) -> usize {
        self.success_count + self.failure_count
    }

    fn record(&mut self, outcome: ItemOutcome) {
        match outcome.status {
            ItemStatus::Success => self.success_count += 1,
            ItemStatus::Error => self.failure_count += 1,
        }
        if self.items.len() < MAX_REPORTED_ITEMS {
            self.items.push(outcome);
        }
    }
}

/// Batch runner
pub struct BatchRunner<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BatchRunner<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sync at most `max_items` candidates, pausing `delay` between two items
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn run_batch(
        &self,
        candidates: Vec<Candidate>,
        delay: Duration,
        max_items: usize,
    ) -> BatchResult {
        let mut result = BatchResult::default();
        let total = candidates.len().min(max_items);

        for (index, candidate) in candidates.into_iter().take(max_items).enumerate() {
            let player_id = candidate.player_id.clone();
            match self.sync_one(&candidate).await {
                Ok(stored) => {
                    debug!(player_id = %player_id, tier = %stored.tier, "Player synced");
                    result.record(ItemOutcome::success(player_id));
                }
                Err(e) => {
                    warn!(player_id = %player_id, error = %e, "Player sync failed");
                    result.record(ItemOutcome::error(player_id, e.to_string()));
                }
            }

            if index + 1 < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        result
    }

    /// Fetch, backfill the group tag, classify and write one player
    async fn sync_one(&self, candidate: &Candidate) -> Result<CachedPlayerStat, DomainError> {
        let mut stats = self
            .ctx
            .stats_source()
            .fetch_player_stats(&candidate.player_id)
            .await?;

        if stats.group_tag.is_none() {
            stats.group_tag = match candidate.known_group_tag() {
                Some(tag) => Some(tag.to_string()),
                None => match self
                    .ctx
                    .account_repo()
                    .group_tag_for(&candidate.player_id)
                    .await
                {
                    Ok(tag) => tag,
                    Err(e) => {
                        warn!(
                            player_id = %candidate.player_id,
                            error = %e,
                            "Group tag lookup failed; writing without a tag"
                        );
                        None
                    }
                },
            };
        }

        let row = CachedPlayerStat::from_stats(
            candidate.player_id.clone(),
            self.ctx.season(),
            &stats,
            Utc::now(),
        );
        self.ctx.cache_repo().upsert(&row).await
    }
}
