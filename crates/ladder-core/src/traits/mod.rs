//! Ports the application layer depends on

mod repositories;

pub use repositories::{
    AccountRepository, LeaderboardPage, PlayerCacheRepository, RepoResult, StatsSource,
};
