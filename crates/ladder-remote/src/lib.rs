//! # ladder-remote
//!
//! HTTP client for the AOE4 World public statistics API.
//!
//! One GET per player, decoded into a typed partial schema and normalized
//! into [`ladder_core::PlayerStats`]. Absent modes are zeroed, never errors.
//! The client does not retry; a failed player is simply reselected by a
//! later cycle.

mod client;
mod error;
mod normalize;
mod schema;

pub use client::RemoteStatsClient;
pub use error::RemoteError;
pub use normalize::normalize;
pub use schema::{AvatarsResponse, ClanResponse, ModeResponse, PlayerResponse};
