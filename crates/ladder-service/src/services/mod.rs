//! Business logic services
//!
//! Read-side services behind the HTTP API and the sync control surface.

pub mod cache_health;
pub mod context;
pub mod error;
pub mod leaderboard;
pub mod player;
pub mod sync_control;

pub use cache_health::CacheHealthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use leaderboard::{LeaderboardService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use player::PlayerService;
pub use sync_control::SyncControlService;
