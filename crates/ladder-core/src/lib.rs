//! # ladder-core
//!
//! Domain layer for the leaderboard cache: entities, value objects, the ports
//! the sync pipeline talks through, and domain errors.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export commonly used types at crate root
pub use entities::{
    CacheHealth, CachedPlayerStat, Candidate, CandidateSource, Group, GroupMembership,
    LeaderboardMode, ModeStats, PlayerAccount, PlayerStats, StaleReason, FRESH_WINDOW,
    STALENESS_WINDOW,
};
pub use entities::window_cutoff;
pub use error::DomainError;
pub use traits::{
    AccountRepository, LeaderboardPage, PlayerCacheRepository, RepoResult, StatsSource,
};
pub use value_objects::{PlayerId, PlayerIdError, RankTier, SeasonId};
