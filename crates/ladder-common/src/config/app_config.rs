//! Application configuration structs
//!
//! Loads configuration from environment variables (a `.env` file is honored).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::SyncSettings;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub remote: RemoteConfig,
    pub sync: SyncConfig,
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Run migrations from this directory on startup
    #[serde(default)]
    pub migrations_dir: Option<String>,
}

/// Remote statistics API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_remote_timeout(),
        }
    }
}

/// Sync pipeline configuration
///
/// `settings` seeds the runtime-mutable copy; the rest is fixed for the
/// process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub settings: SyncSettings,
    #[serde(default = "default_season_id")]
    pub season_id: i32,
    #[serde(default = "default_new_account_window")]
    pub new_account_window_hours: u64,
    #[serde(default = "default_initial_delay")]
    pub initial_delay_secs: u64,
}

impl SyncConfig {
    #[must_use]
    pub fn new_account_window(&self) -> Duration {
        Duration::from_secs(self.new_account_window_hours * 60 * 60)
    }

    #[must_use]
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            settings: SyncSettings::default(),
            season_id: default_season_id(),
            new_account_window_hours: default_new_account_window(),
            initial_delay_secs: default_initial_delay(),
        }
    }
}

/// Control surface configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Bearer token for the control surface. `None` disables it.
    #[serde(default)]
    pub token: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "ladder-sync".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_remote_base_url() -> String {
    "https://aoe4world.com/api/v0".to_string()
}

fn default_user_agent() -> String {
    format!("ladder-sync/{}", env!("CARGO_PKG_VERSION"))
}

fn default_remote_timeout() -> u64 {
    30
}

fn default_season_id() -> i32 {
    11
}

fn default_new_account_window() -> u64 {
    168 // 7 days
}

fn default_initial_delay() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Parse an optional variable, falling back to `default` when unset or unparseable
fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or settings are out of range
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = SyncSettings::default();
        let settings = SyncSettings {
            enabled: lookup("SYNC_ENABLED")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.enabled),
            interval_secs: parse_or(&lookup, "SYNC_INTERVAL_SECS", defaults.interval_secs),
            max_items: parse_or(&lookup, "SYNC_MAX_ITEMS", defaults.max_items),
            item_delay_ms: parse_or(&lookup, "SYNC_ITEM_DELAY_MS", defaults.item_delay_ms),
            stale_batch_size: parse_or(&lookup, "SYNC_STALE_BATCH_SIZE", defaults.stale_batch_size),
        };
        settings
            .validate()
            .map_err(|e| ConfigError::InvalidValue("SYNC_*", e.to_string()))?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: lookup("API_PORT")
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections(),
                ),
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections(),
                ),
                migrations_dir: lookup("DATABASE_MIGRATIONS_DIR").filter(|s| !s.trim().is_empty()),
            },
            remote: RemoteConfig {
                base_url: lookup("REMOTE_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_remote_base_url),
                user_agent: lookup("REMOTE_USER_AGENT").unwrap_or_else(default_user_agent),
                timeout_secs: parse_or(&lookup, "REMOTE_TIMEOUT_SECS", default_remote_timeout()),
            },
            sync: SyncConfig {
                settings,
                season_id: parse_or(&lookup, "SYNC_SEASON_ID", default_season_id()),
                new_account_window_hours: parse_or(
                    &lookup,
                    "SYNC_NEW_ACCOUNT_WINDOW_HOURS",
                    default_new_account_window(),
                ),
                initial_delay_secs: parse_or(
                    &lookup,
                    "SYNC_INITIAL_DELAY_SECS",
                    default_initial_delay(),
                ),
            },
            admin: AdminConfig {
                token: lookup("ADMIN_TOKEN").filter(|s| !s.trim().is_empty()),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    &lookup,
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second(),
                ),
                burst: parse_or(&lookup, "RATE_LIMIT_BURST", default_burst()),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
