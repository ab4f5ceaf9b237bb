//! Install records and their state machine
//!
//! ```text
//! pending ──▶ in_progress ──▶ completed
//!    ▲             │
//!    │             └────────▶ failed
//!    └──────── retry ───────────┘
//! ```
//!
//! An `in_progress` record seen at the start of a run belongs to a crashed run
//! and is returned to `pending`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, state};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallState {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl InstallState {
    pub fn as_str(self) -> &'static str {
        match self {
            InstallState::Pending => "pending",
            InstallState::InProgress => "in_progress",
            InstallState::Completed => "completed",
            InstallState::Failed => "failed",
        }
    }

    fn can_move_to(self, to: InstallState) -> bool {
        use InstallState::{Completed, Failed, InProgress, Pending};
        matches!(
            (self, to),
            (Pending, InProgress)
                | (InProgress, Completed | Failed)
                | (Failed | InProgress, Pending)
        )
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted progress of one unit in one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRecord {
    pub unit_id: String,
    pub state: InstallState,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub chosen_options: BTreeMap<String, String>,
    /// Present only while `state` is `failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl InstallRecord {
    pub fn pending(unit_id: impl Into<String>, chosen_options: BTreeMap<String, String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            state: InstallState::Pending,
            chosen_options,
            error_detail: None,
        }
    }

    /// Move to `to`, keeping `error_detail` consistent with the new state
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` for any move outside the state machine.
    pub fn transition(&mut self, to: InstallState, error_detail: Option<String>) -> Result<()> {
        if !self.state.can_move_to(to) {
            return Err(state::invalid_transition(&self.unit_id, self.state, to));
        }
        self.state = to;
        self.error_detail = if to == InstallState::Failed {
            Some(error_detail.unwrap_or_else(|| "unknown error".to_string()))
        } else {
            None
        };
        Ok(())
    }
}
