//! Application state
//!
//! Holds the shared state for the Axum application: the sync pipeline
//! (which owns the service context), the database pool for readiness
//! probes, and configuration.

use std::sync::Arc;

use ladder_common::AppConfig;
use ladder_db::PgPool;
use ladder_service::{ServiceContext, SyncPipeline};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pipeline: SyncPipeline,
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pipeline: SyncPipeline, pool: PgPool, config: AppConfig) -> Self {
        Self {
            pipeline,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        self.pipeline.context()
    }

    /// Pipeline shared with the background scheduler
    pub fn pipeline(&self) -> &SyncPipeline {
        &self.pipeline
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Configured admin bearer token, if the control surface is enabled
    pub fn admin_token(&self) -> Option<&str> {
        self.config.admin.token.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .field("config", &"AppConfig")
            .finish()
    }
}
