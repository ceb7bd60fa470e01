//! Service context - dependency container for services
//!
//! Holds the ports, the live sync settings and the fixed sync parameters.

use std::sync::Arc;
use std::time::Duration;

use ladder_common::{SharedSyncSettings, SyncConfig};
use ladder_core::traits::{AccountRepository, PlayerCacheRepository, StatsSource};
use ladder_core::value_objects::SeasonId;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    cache_repo: Arc<dyn PlayerCacheRepository>,
    account_repo: Arc<dyn AccountRepository>,
    stats_source: Arc<dyn StatsSource>,

    // Runtime-mutable settings
    settings: SharedSyncSettings,

    // Fixed for the process lifetime
    season: SeasonId,
    new_account_window: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        cache_repo: Arc<dyn PlayerCacheRepository>,
        account_repo: Arc<dyn AccountRepository>,
        stats_source: Arc<dyn StatsSource>,
        settings: SharedSyncSettings,
        season: SeasonId,
        new_account_window: Duration,
    ) -> Self {
        Self {
            cache_repo,
            account_repo,
            stats_source,
            settings,
            season,
            new_account_window,
        }
    }

    // === Ports ===

    /// Get the player cache repository
    pub fn cache_repo(&self) -> &dyn PlayerCacheRepository {
        self.cache_repo.as_ref()
    }

    /// Get the account repository
    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    /// Get the remote statistics source
    pub fn stats_source(&self) -> &dyn StatsSource {
        self.stats_source.as_ref()
    }

    // === Settings ===

    /// Shared handle to the live sync settings
    pub fn settings(&self) -> &SharedSyncSettings {
        &self.settings
    }

    /// Active season
    pub fn season(&self) -> SeasonId {
        self.season
    }

    /// How far back the new-account selector looks
    pub fn new_account_window(&self) -> Duration {
        self.new_account_window
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ports", &"...")
            .field("settings", &self.settings.snapshot())
            .field("season", &self.season)
            .field("new_account_window", &self.new_account_window)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    cache_repo: Option<Arc<dyn PlayerCacheRepository>>,
    account_repo: Option<Arc<dyn AccountRepository>>,
    stats_source: Option<Arc<dyn StatsSource>>,
    settings: SharedSyncSettings,
    season: SeasonId,
    new_account_window: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        let defaults = SyncConfig::default();
        Self {
            cache_repo: None,
            account_repo: None,
            stats_source: None,
            settings: SharedSyncSettings::new(defaults.settings.clone()),
            season: SeasonId::new(defaults.season_id),
            new_account_window: defaults.new_account_window(),
        }
    }

    pub fn cache_repo(mut self, repo: Arc<dyn PlayerCacheRepository>) -> Self {
        self.cache_repo = Some(repo);
        self
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn stats_source(mut self, source: Arc<dyn StatsSource>) -> Self {
        self.stats_source = Some(source);
        self
    }

    pub fn settings(mut self, settings: SharedSyncSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn season(mut self, season: SeasonId) -> Self {
        self.season = season;
        self
    }

    pub fn new_account_window(mut self, window: Duration) -> Self {
        self.new_account_window = window;
        self
    }

    /// Apply the fixed parts of a [`SyncConfig`] and seed the live settings from it
    pub fn sync_config(self, config: &SyncConfig) -> Self {
        self.settings(SharedSyncSettings::new(config.settings.clone()))
            .season(SeasonId::new(config.season_id))
            .new_account_window(config.new_account_window())
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.cache_repo
                .ok_or_else(|| ServiceError::validation("cache_repo is required"))?,
            self.account_repo
                .ok_or_else(|| ServiceError::validation("account_repo is required"))?,
            self.stats_source
                .ok_or_else(|| ServiceError::validation("stats_source is required"))?,
            self.settings,
            self.season,
            self.new_account_window,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
