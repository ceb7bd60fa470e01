//! # ladder-api
//!
//! HTTP surface built with Axum: health probes, the sync control surface
//! and read endpoints over the player cache.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
