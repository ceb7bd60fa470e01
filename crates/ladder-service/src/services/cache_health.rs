//! Cache health service

use tracing::instrument;

use crate::dto::CacheHealthResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Cache health reporter for the active season
pub struct CacheHealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CacheHealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Single aggregate read over the active season
    #[instrument(skip(self))]
    pub async fn report(&self) -> ServiceResult<CacheHealthResponse> {
        let season = self.ctx.season();
        let health = self.ctx.cache_repo().health_snapshot(season).await?;
        Ok(CacheHealthResponse::new(season, health))
    }
}
