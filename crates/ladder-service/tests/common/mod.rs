//! Service wired over the in-memory ports, shared by the service tests

#![allow(dead_code)]

use std::sync::Arc;

use ladder_common::{SharedSyncSettings, SyncSettings};
use ladder_core::testing::{FakeStatsSource, InMemoryAccounts, InMemoryCache};
use ladder_core::value_objects::{PlayerId, SeasonId};
use ladder_service::{ServiceContext, ServiceContextBuilder};

pub use ladder_core::testing::complete_stats;

pub const SEASON: SeasonId = SeasonId::new(11);

pub fn pid(raw: &str) -> PlayerId {
    PlayerId::parse(raw).unwrap()
}

pub struct Harness {
    pub cache: Arc<InMemoryCache>,
    pub accounts: Arc<InMemoryAccounts>,
    pub remote: Arc<FakeStatsSource>,
    pub ctx: ServiceContext,
}

impl Harness {
    /// Fakes wired into a context with no inter-item delay
    pub fn new() -> Self {
        Self::with_settings(SyncSettings {
            item_delay_ms: 0,
            ..SyncSettings::default()
        })
    }

    pub fn with_settings(settings: SyncSettings) -> Self {
        let cache = Arc::new(InMemoryCache::default());
        let accounts = Arc::new(InMemoryAccounts::new(cache.clone()));
        let remote = Arc::new(FakeStatsSource::default());

        let ctx = ServiceContextBuilder::new()
            .cache_repo(cache.clone())
            .account_repo(accounts.clone())
            .stats_source(remote.clone())
            .settings(SharedSyncSettings::new(settings))
            .season(SEASON)
            .build()
            .unwrap();

        Self {
            cache,
            accounts,
            remote,
            ctx,
        }
    }
}
