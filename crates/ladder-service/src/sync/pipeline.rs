//! Sync pipeline - one cycle is the three phases run back to back
//!
//! Only one cycle runs at a time. The scheduler and the control surface share
//! a [`SyncPipeline`] clone; whoever loses the race gets a conflict instead of
//! a second concurrent cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ladder_common::SyncSettings;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::batch::{BatchResult, BatchRunner};
use super::phase::SyncPhase;
use super::selectors::CandidateSelector;
use crate::services::{ServiceContext, ServiceError, ServiceResult};

/// How a single phase ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseOutcome {
    Completed { result: BatchResult },
    SelectorFailed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: SyncPhase,
    /// Candidates returned by the selector, before truncation
    pub selected: usize,
    #[serde(flatten)]
    pub outcome: PhaseOutcome,
}

impl PhaseReport {
    pub fn batch(&self) -> Option<&BatchResult> {
        match &self.outcome {
            PhaseOutcome::Completed { result } => Some(result),
            PhaseOutcome::SelectorFailed { .. } => None,
        }
    }
}

/// Summary of one full cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub phases: Vec<PhaseReport>,
}

impl CycleReport {
    pub fn success_count(&self) -> usize {
        self.phases
            .iter()
            .filter_map(PhaseReport::batch)
            .map(|b| b.success_count)
            .sum()
    }

    pub fn failure_count(&self) -> usize {
        self.phases
            .iter()
            .filter_map(PhaseReport::batch)
            .map(|b| b.failure_count)
            .sum()
    }

    pub fn failed_phases(&self) -> usize {
        self.phases.iter().filter(|p| p.batch().is_none()).count()
    }
}

/// Sync pipeline shared by the scheduler and the control surface
#[derive(Clone)]
pub struct SyncPipeline {
    ctx: ServiceContext,
    cycle_permit: Arc<Semaphore>,
    last_report: Arc<RwLock<Option<CycleReport>>>,
}

impl SyncPipeline {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            cycle_permit: Arc::new(Semaphore::new(1)),
            last_report: Arc::new(RwLock::new(None)),
        }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Whether a cycle is in flight right now
    pub fn is_running(&self) -> bool {
        self.cycle_permit.available_permits() == 0
    }

    /// Report of the most recently finished cycle
    pub fn last_report(&self) -> Option<CycleReport> {
        self.last_report.read().clone()
    }

    /// Run all phases with a fresh settings snapshot.
    ///
    /// Ignores the `enabled` flag; the scheduler checks it before calling.
    pub async fn run_cycle(&self) -> ServiceResult<CycleReport> {
        let settings = self.ctx.settings().snapshot();
        self.run_with(&settings, &SyncPhase::ALL).await
    }

    /// Start a full cycle on its own task.
    ///
    /// The permit is taken before spawning, so a conflict is returned here
    /// rather than from the task. Dropping the handle does not stop the
    /// cycle; it runs to the end and records its report.
    ///
    /// # Errors
    /// Returns `ServiceError::Conflict` if another cycle is already running.
    pub fn spawn_cycle(&self) -> ServiceResult<JoinHandle<CycleReport>> {
        let permit = self
            .cycle_permit
            .clone()
            .try_acquire_owned()
            .map_err(|_| ServiceError::conflict("sync cycle already running"))?;

        let settings = self.ctx.settings().snapshot();
        let pipeline = self.clone();
        Ok(tokio::spawn(async move {
            let report = pipeline.execute(&settings, &SyncPhase::ALL).await;
            drop(permit);
            report
        }))
    }

    /// Run the given phases in order with explicit settings
    ///
    /// # Errors
    /// Returns `ServiceError::Conflict` if another cycle is already running.
    pub async fn run_with(
        &self,
        settings: &SyncSettings,
        phases: &[SyncPhase],
    ) -> ServiceResult<CycleReport> {
        let _permit = self
            .cycle_permit
            .try_acquire()
            .map_err(|_| ServiceError::conflict("sync cycle already running"))?;

        Ok(self.execute(settings, phases).await)
    }

    /// Caller must hold the cycle permit
    #[instrument(skip(self, settings), fields(season = %self.ctx.season()))]
    async fn execute(&self, settings: &SyncSettings, phases: &[SyncPhase]) -> CycleReport {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(phases.len());
        for &phase in phases {
            reports.push(self.run_phase(phase, settings).await);
        }
        let finished_at = Utc::now();

        let report = CycleReport {
            started_at,
            finished_at,
            duration_ms: (finished_at - started_at).num_milliseconds(),
            phases: reports,
        };
        *self.last_report.write() = Some(report.clone());
        report
    }

    async fn run_phase(&self, phase: SyncPhase, settings: &SyncSettings) -> PhaseReport {
        let candidates = match CandidateSelector::new(&self.ctx)
            .select(phase, settings, Utc::now())
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(%phase, error = %e, "Candidate selection failed");
                return PhaseReport {
                    phase,
                    selected: 0,
                    outcome: PhaseOutcome::SelectorFailed {
                        error: e.to_string(),
                    },
                };
            }
        };

        let selected = candidates.len();
        let result = BatchRunner::new(&self.ctx)
            .run_batch(candidates, settings.item_delay(), settings.max_items)
            .await;

        info!(
            %phase,
            selected,
            succeeded = result.success_count,
            failed = result.failure_count,
            "Sync phase finished"
        );

        PhaseReport {
            phase,
            selected,
            outcome: PhaseOutcome::Completed { result },
        }
    }
}

impl std::fmt::Debug for SyncPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncPipeline")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
