//! Database models - SQLx-compatible structs for PostgreSQL tables

mod account;
mod player_cache;

pub use account::{GroupMemberCandidateModel, UncachedAccountModel};
pub use player_cache::{CacheHealthModel, PlayerCacheModel, StaleRowModel};
