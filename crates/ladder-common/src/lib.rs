//! # ladder-common
//!
//! Shared utilities including configuration, runtime sync settings, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, RemoteConfig, ServerConfig, SettingsError, SharedSyncSettings, SyncConfig,
    SyncSettings, SyncSettingsPatch,
};
pub use error::AppError;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
