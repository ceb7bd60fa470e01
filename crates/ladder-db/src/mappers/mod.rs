//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects,
//!   rejecting rows whose player id no longer validates
//! - `*Upsert` structs: prepare entity data for database writes

mod account;
mod player_cache;

pub use account::{account_candidate, group_member_candidate};
pub use player_cache::{health_from_model, stale_candidate, PlayerCacheUpsert};
