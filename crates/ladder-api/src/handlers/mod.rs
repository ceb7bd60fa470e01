//! HTTP request handlers

pub mod cache;
pub mod health;
pub mod leaderboard;
pub mod players;
pub mod sync;
