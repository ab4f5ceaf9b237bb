//! The seam between the engine and whatever performs an installation

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::error::PlinthError;

/// Failure reported by a [`UnitInstaller`]
///
/// The message becomes the record's `error_detail`, so it should say what
/// went wrong without needing the log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InstallError {
    message: String,
}

impl InstallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for InstallError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<PlinthError> for InstallError {
    fn from(err: PlinthError) -> Self {
        Self::new(err.to_string())
    }
}

/// Performs the installation of a single unit into a project
///
/// Implementations must be safe to run again for a unit whose previous
/// attempt crashed, and must report any partial failure as an error.
pub trait UnitInstaller {
    fn install(
        &self,
        unit_id: &str,
        chosen_options: &BTreeMap<String, String>,
        project: &Path,
    ) -> Result<(), InstallError>;
}
