//! Sequential, resumable execution of an installation plan
//!
//! The engine walks the plan in order and drives each unit through the
//! record state machine:
//!
//! ```text
//! pending ──(persist)──▶ in_progress ──installer ok──▶ completed (persist)
//!                             └────installer error──▶ failed (persist)
//! ```
//!
//! `in_progress` is written before the installer runs, so a crash leaves a
//! record the next run recognizes and re-attempts. Units that depend on a
//! failed unit are never executed; they keep their `pending` record and show
//! up in the report as skipped.

pub mod installer;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::{PlinthError, Result};
use crate::resolver::{InstallationPlan, PlanEntry};
use crate::state::InstallStateStore;
use crate::ui::ProgressReporter;

pub use installer::{InstallError, UnitInstaller};

/// Shared flag checked between units
///
/// Cancelling never interrupts a running installer; the engine stops before
/// the next unit.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happens to the rest of the plan after a unit fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Stop at the first failure
    #[default]
    FailFast,
    /// Keep installing units that do not depend on a failed unit
    ContinueOnError,
}

/// Outcome of one plan entry in this run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UnitOutcome {
    Completed,
    Failed { detail: String },
    /// A requirement failed in this run; `blocked_by` is the failed unit
    Skipped { blocked_by: String },
    /// Not reached because execution halted
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub unit_id: String,
    #[serde(flatten)]
    pub outcome: UnitOutcome,
}

/// Why execution stopped before the end of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Halt {
    Failed { unit_id: String },
    Interrupted,
}

/// Per-unit outcomes of one `execute` call, in plan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub units: Vec<UnitReport>,
    pub halt: Option<Halt>,
}

impl ExecutionReport {
    pub fn outcome(&self, unit_id: &str) -> Option<&UnitOutcome> {
        self.units
            .iter()
            .find(|u| u.unit_id == unit_id)
            .map(|u| &u.outcome)
    }

    pub fn count(&self, matches: impl Fn(&UnitOutcome) -> bool) -> usize {
        self.units.iter().filter(|u| matches(&u.outcome)).count()
    }

    /// Every unit completed and nothing halted
    pub fn is_success(&self) -> bool {
        self.halt.is_none()
            && self
                .units
                .iter()
                .all(|u| u.outcome == UnitOutcome::Completed)
    }

    /// The error a caller should exit with, if the run did not fully succeed
    pub fn to_error(&self) -> Option<PlinthError> {
        if self.halt == Some(Halt::Interrupted) {
            return Some(PlinthError::Interrupted);
        }
        self.units.iter().find_map(|u| match &u.outcome {
            UnitOutcome::Failed { detail } => Some(PlinthError::InstallFailed {
                unit: u.unit_id.clone(),
                detail: detail.clone(),
            }),
            _ => None,
        })
    }
}

/// Drives an [`InstallationPlan`] through a [`UnitInstaller`]
pub struct ExecutionEngine<'a> {
    installer: &'a dyn UnitInstaller,
    project: PathBuf,
    failure_mode: FailureMode,
    cancel: CancellationToken,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(installer: &'a dyn UnitInstaller, project: impl Into<PathBuf>) -> Self {
        Self {
            installer,
            project: project.into(),
            failure_mode: FailureMode::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Install every entry of `plan` in order
    ///
    /// Installer failures are recorded and reported, not returned as `Err`.
    ///
    /// # Errors
    ///
    /// Only state persistence failures abort execution.
    pub fn execute(
        &self,
        plan: &InstallationPlan,
        store: &mut InstallStateStore,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ExecutionReport> {
        store.recover_interrupted()?;
        store.prepare(
            plan.entries
                .iter()
                .map(|e| (e.unit_id.as_str(), &e.chosen_options)),
        )?;

        let total = plan.len();
        let mut report = ExecutionReport::default();
        // unit id -> failed unit it is (transitively) blocked by
        let mut blocked: BTreeMap<&str, String> = BTreeMap::new();

        for (index, entry) in plan.entries.iter().enumerate() {
            let outcome = if let Some(root) = blocked_by(entry, &blocked) {
                UnitOutcome::Skipped { blocked_by: root }
            } else if report.halt.is_some() {
                UnitOutcome::NotStarted
            } else if self.cancel.is_cancelled() {
                tracing::warn!(unit = %entry.unit_id, "installation interrupted before unit");
                report.halt = Some(Halt::Interrupted);
                UnitOutcome::NotStarted
            } else {
                progress.unit_started(&entry.unit_id, index + 1, total);
                self.run_unit(entry, store)?
            };

            match &outcome {
                UnitOutcome::Failed { .. } => {
                    blocked.insert(&entry.unit_id, entry.unit_id.clone());
                    if self.failure_mode == FailureMode::FailFast {
                        report.halt = Some(Halt::Failed {
                            unit_id: entry.unit_id.clone(),
                        });
                    }
                }
                UnitOutcome::Skipped { blocked_by } => {
                    tracing::info!(unit = %entry.unit_id, blocked_by = %blocked_by, "skipping unit");
                    blocked.insert(&entry.unit_id, blocked_by.clone());
                }
                UnitOutcome::Completed | UnitOutcome::NotStarted => {}
            }

            progress.unit_finished(&entry.unit_id, &outcome);
            report.units.push(UnitReport {
                unit_id: entry.unit_id.clone(),
                outcome,
            });
        }

        if report.is_success() {
            progress.finish();
        } else {
            progress.abandon();
        }
        Ok(report)
    }

    fn run_unit(&self, entry: &PlanEntry, store: &mut InstallStateStore) -> Result<UnitOutcome> {
        store.mark_in_progress(&entry.unit_id)?;
        tracing::info!(unit = %entry.unit_id, "installing unit");

        match self
            .installer
            .install(&entry.unit_id, &entry.chosen_options, &self.project)
        {
            Ok(()) => {
                store.mark_completed(&entry.unit_id)?;
                tracing::info!(unit = %entry.unit_id, "unit completed");
                Ok(UnitOutcome::Completed)
            }
            Err(err) => {
                let detail = err.message().to_string();
                store.mark_failed(&entry.unit_id, detail.clone())?;
                tracing::info!(unit = %entry.unit_id, error = %detail, "unit failed");
                Ok(UnitOutcome::Failed { detail })
            }
        }
    }
}

/// Root failed unit behind any of `entry`'s requirements, smallest id first
fn blocked_by(entry: &PlanEntry, blocked: &BTreeMap<&str, String>) -> Option<String> {
    entry
        .requires
        .iter()
        .find_map(|dep| blocked.get(dep.as_str()).cloned())
}
