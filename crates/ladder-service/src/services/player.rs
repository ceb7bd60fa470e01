//! Player service

use chrono::Utc;
use ladder_core::value_objects::PlayerId;
use tracing::instrument;

use crate::dto::PlayerStatResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct PlayerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PlayerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cached row for one player in the active season
    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> ServiceResult<PlayerStatResponse> {
        let player_id = PlayerId::parse(raw_id).map_err(|e| ServiceError::validation(e.to_string()))?;

        let stat = self
            .ctx
            .cache_repo()
            .find(&player_id, self.ctx.season())
            .await?
            .ok_or_else(|| ServiceError::not_found("Player", player_id.as_str()))?;

        Ok(PlayerStatResponse::from_stat(stat, Utc::now()))
    }
}
