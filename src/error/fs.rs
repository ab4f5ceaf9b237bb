//! File system errors

use std::path::Path;

use super::PlinthError;

pub fn read_failed(path: &Path, reason: impl ToString) -> PlinthError {
    PlinthError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn write_failed(path: &Path, reason: impl ToString) -> PlinthError {
    PlinthError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> PlinthError {
    PlinthError::IoError {
        message: message.into(),
    }
}
