//! Integration test utilities for the ladder sync service
//!
//! This crate provides a stub of the remote statistics API and helpers for
//! spawning the HTTP API in tests, in memory or over PostgreSQL.

pub mod helpers;
pub mod stub_remote;

pub use helpers::*;
pub use stub_remote::*;
