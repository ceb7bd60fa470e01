//! Cache sync pipeline
//!
//! Scheduler → [selector → batch runner (fetch → tag backfill → classify →
//! upsert)] × 3 phases → sleep → repeat.

mod batch;
mod phase;
mod pipeline;
mod scheduler;
mod selectors;

pub use batch::{BatchResult, BatchRunner, ItemOutcome, ItemStatus, MAX_REPORTED_ITEMS};
pub use phase::{SyncPhase, SyncPhaseParseError};
pub use pipeline::{CycleReport, PhaseOutcome, PhaseReport, SyncPipeline};
pub use scheduler::Scheduler;
pub use selectors::{CandidateSelector, NEW_ACCOUNT_PAGE_SIZE};
