//! Install state errors

use std::path::Path;

use super::PlinthError;

pub fn read_failed(path: &Path, reason: impl ToString) -> PlinthError {
    PlinthError::StateReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn write_failed(path: &Path, reason: impl ToString) -> PlinthError {
    PlinthError::StateWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// A record transition outside pending -> in_progress -> {completed, failed}
pub fn invalid_transition(
    unit: impl Into<String>,
    from: impl ToString,
    to: impl ToString,
) -> PlinthError {
    PlinthError::InvalidStateTransition {
        unit: unit.into(),
        from: from.to_string(),
        to: to.to_string(),
    }
}
