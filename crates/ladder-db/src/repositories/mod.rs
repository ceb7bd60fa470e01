//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in ladder-core.

mod account;
mod error;
mod player_cache;

pub use account::PgAccountRepository;
pub use player_cache::PgPlayerCacheRepository;
