//! Axum extractors for request handling
//!
//! Custom extractors for admin authentication, validation, and leaderboard paging.

mod admin;
mod leaderboard;
mod validated;

pub use admin::AdminAuth;
pub use leaderboard::{LeaderboardParams, LeaderboardQuery};
pub use validated::ValidatedJson;
