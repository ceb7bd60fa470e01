//! Configuration structs

mod app_config;
mod sync_settings;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, RemoteConfig, ServerConfig, SyncConfig,
};
pub use sync_settings::{SettingsError, SharedSyncSettings, SyncSettings, SyncSettingsPatch};
