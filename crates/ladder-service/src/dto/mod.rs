//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::UpdateSyncSettingsRequest;

pub use responses::{
    CacheHealthResponse, HealthChecks, HealthResponse, LeaderboardEntry, LeaderboardResponse,
    PageMeta, PlayerStatResponse, ReadinessResponse, SyncStatusResponse,
};
