//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while the engine installs units
//! - Interactive progress bars using indicatif
//! - Silent progress for dry-run and quiet mode
//! - Human readable output of plans, reports and status ([`display`])
//!
//! The engine reports through the [`ProgressReporter`] trait only, so it can
//! run under a terminal, in tests, or with `--quiet` without knowing which.

pub mod display;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::engine::UnitOutcome;

/// Progress callbacks issued by the execution engine
pub trait ProgressReporter {
    /// Show the unit about to be installed
    fn unit_started(&mut self, unit_id: &str, current: usize, total: usize);

    /// Record the terminal outcome of a unit
    fn unit_finished(&mut self, unit_id: &str, outcome: &UnitOutcome);

    /// All units processed
    fn finish(&mut self);

    /// Stop early on failure or interrupt
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    unit_pb: ProgressBar,
}

impl InteractiveProgressReporter {
    /// Create a new interactive progress reporter with total unit count
    pub fn new(total_units: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let unit_pb = ProgressBar::new(total_units);
        unit_pb.set_style(style);

        Self { unit_pb }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn unit_started(&mut self, unit_id: &str, current: usize, total: usize) {
        self.unit_pb
            .set_message(format!("({current}/{total}) {unit_id}"));
    }

    fn unit_finished(&mut self, unit_id: &str, outcome: &UnitOutcome) {
        match outcome {
            UnitOutcome::Completed => {
                self.unit_pb.println(format!(
                    "  {} {}",
                    Style::new().green().apply_to("✓"),
                    unit_id
                ));
            }
            UnitOutcome::Failed { detail } => {
                self.unit_pb.println(format!(
                    "  {} {}: {}",
                    Style::new().red().apply_to("✗"),
                    unit_id,
                    detail
                ));
            }
            UnitOutcome::Skipped { blocked_by } => {
                self.unit_pb.println(format!(
                    "  {} {} (blocked by {})",
                    Style::new().yellow().apply_to("-"),
                    unit_id,
                    blocked_by
                ));
            }
            UnitOutcome::NotStarted => return,
        }
        self.unit_pb.inc(1);
    }

    fn finish(&mut self) {
        self.unit_pb.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.unit_pb.abandon();
    }
}

/// Silent progress reporter for dry-run and quiet mode
#[derive(Debug, Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn unit_started(&mut self, _unit_id: &str, _current: usize, _total: usize) {
        // No-op for silent mode
    }

    fn unit_finished(&mut self, _unit_id: &str, _outcome: &UnitOutcome) {
        // No-op for silent mode
    }

    fn finish(&mut self) {
        // No-op for silent mode
    }

    fn abandon(&mut self) {
        // No-op for silent mode
    }
}
