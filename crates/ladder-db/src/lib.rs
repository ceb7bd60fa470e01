//! # ladder-db
//!
//! Database layer implementing the cache and account ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and the migration runner
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ladder_db::pool::{create_pool, DatabaseConfig};
//! use ladder_db::repositories::PgPlayerCacheRepository;
//! use ladder_core::traits::PlayerCacheRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let cache = PgPlayerCacheRepository::new(pool);
//!
//!     let health = cache.health_snapshot(11.into()).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    check_connection, create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool,
};
pub use repositories::{PgAccountRepository, PgPlayerCacheRepository};
