//! # ladder-service
//!
//! Application layer: the cache sync pipeline and its scheduler, plus the
//! read-side services and DTOs behind the HTTP API.

pub mod dto;
pub mod services;
pub mod sync;

pub use services::{
    CacheHealthService, LeaderboardService, PlayerService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SyncControlService,
};
pub use sync::{
    BatchResult, BatchRunner, CycleReport, ItemOutcome, PhaseOutcome, PhaseReport, Scheduler,
    SyncPhase, SyncPipeline,
};
