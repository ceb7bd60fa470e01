//! Domain entities

mod account;
mod cached_stat;
mod candidate;
mod player_stats;

pub use account::{Group, GroupMembership, PlayerAccount};
pub use cached_stat::{
    window_cutoff, CacheHealth, CachedPlayerStat, LeaderboardMode, StaleReason, FRESH_WINDOW,
    STALENESS_WINDOW,
};
pub use candidate::{Candidate, CandidateSource};
pub use player_stats::{ModeStats, PlayerStats};
