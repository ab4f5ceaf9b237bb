//! Error types and handling for Plinth
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Variants are grouped by the stage that raises them. Every variant maps to an
//! [`ErrorCategory`], which decides how the failure propagates:
//! - catalog and plan errors abort before any side effect
//! - install errors are recorded per unit by the execution engine
//! - concurrency errors abort the run without touching state
//!
//! Convenience constructors live in the sub-modules:
//! - [`catalog`]: catalog validation errors
//! - [`plan`]: selection and planning errors
//! - [`state`]: install state persistence errors
//! - [`fs`]: file system errors

pub mod catalog;
pub mod fs;
pub mod plan;
pub mod state;

#[cfg(test)]
mod tests;

use miette::Diagnostic;
use thiserror::Error;

/// Coarse classification of a [`PlinthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or inconsistent catalog
    Catalog,
    /// Unresolvable selection
    Plan,
    /// A unit installer failed
    Install,
    /// Lock contention between runs
    Concurrency,
    /// Install state could not be read or written
    State,
    /// Project configuration problems
    Config,
    /// Other I/O failures
    Io,
}

/// Main error type for Plinth operations
#[derive(Error, Diagnostic, Debug)]
pub enum PlinthError {
    // Catalog errors
    #[error("Catalog not found: {path}")]
    #[diagnostic(
        code(plinth::catalog::not_found),
        help("Pass --catalog, set PLINTH_CATALOG, or set 'catalog' in .plinth/config.yaml")
    )]
    CatalogNotFound { path: String },

    #[error("Failed to read catalog '{path}': {reason}")]
    #[diagnostic(code(plinth::catalog::read_failed))]
    CatalogReadFailed { path: String, reason: String },

    #[error("Failed to parse catalog '{path}': {reason}")]
    #[diagnostic(code(plinth::catalog::parse_failed))]
    CatalogParseFailed { path: String, reason: String },

    #[error("Unit '{id}' is declared more than once")]
    #[diagnostic(code(plinth::catalog::duplicate_unit))]
    DuplicateUnit { id: String },

    #[error("Unit '{unit}' lists unknown unit '{reference}' in '{field}'")]
    #[diagnostic(
        code(plinth::catalog::unknown_reference),
        help("Every id in 'requires' and 'conflicts' must be declared in the same catalog")
    )]
    UnknownReference {
        unit: String,
        field: String,
        reference: String,
    },

    #[error("Unit '{unit}' requires itself")]
    #[diagnostic(code(plinth::catalog::self_dependency))]
    SelfDependency { unit: String },

    #[error("Unit '{unit}' conflicts with itself")]
    #[diagnostic(code(plinth::catalog::self_conflict))]
    SelfConflict { unit: String },

    #[error("Invalid option '{option}' on unit '{unit}': {reason}")]
    #[diagnostic(code(plinth::catalog::invalid_option))]
    InvalidOption {
        unit: String,
        option: String,
        reason: String,
    },

    #[error("Unit '{unit}' conflicts with '{other}', which it also requires")]
    #[diagnostic(
        code(plinth::catalog::requirement_conflict),
        help("A unit can never be installed if one of its requirements is excluded")
    )]
    RequirementConflict { unit: String, other: String },

    #[error("Invalid install action on unit '{unit}': {reason}")]
    #[diagnostic(code(plinth::catalog::invalid_install_action))]
    InvalidInstallAction { unit: String, reason: String },

    // Plan errors
    #[error("Unit '{id}' not found in catalog")]
    #[diagnostic(
        code(plinth::plan::unknown_unit),
        help("Run 'plinth list --all' to see the units in the catalog")
    )]
    UnknownUnit { id: String },

    #[error("Unit '{id}' is not installable (status: {status})")]
    #[diagnostic(
        code(plinth::plan::unavailable_unit),
        help("Only units with status 'stable' can be installed")
    )]
    UnavailableUnit { id: String, status: String },

    #[error("Unit '{id}' required by '{required_by}' is not installable (status: {status})")]
    #[diagnostic(
        code(plinth::plan::unavailable_requirement),
        help("Only units with status 'stable' can be installed")
    )]
    UnavailableRequirement {
        id: String,
        status: String,
        required_by: String,
    },

    #[error("Circular dependency detected: {chain}")]
    #[diagnostic(
        code(plinth::plan::circular),
        help("Remove one of the 'requires' edges on the cycle from the catalog")
    )]
    CircularDependency { chain: String, cycle: Vec<String> },

    #[error("Conflicting units selected: {}", format_pairs(.pairs))]
    #[diagnostic(
        code(plinth::plan::conflict),
        help("Deselect one unit of each conflicting pair")
    )]
    Conflict { pairs: Vec<(String, String)> },

    #[error("Unit '{unit}' has no option named '{option}'")]
    #[diagnostic(code(plinth::plan::unknown_option))]
    UnknownOption { unit: String, option: String },

    #[error("Value '{value}' is not allowed for option '{option}' of unit '{unit}' (allowed: {allowed})")]
    #[diagnostic(code(plinth::plan::invalid_option_choice))]
    InvalidOptionChoice {
        unit: String,
        option: String,
        value: String,
        allowed: String,
    },

    #[error("Invalid option '{spec}'")]
    #[diagnostic(
        code(plinth::plan::invalid_option_spec),
        help("Options are written as UNIT:NAME=VALUE, e.g. languages/python:linter=ruff")
    )]
    InvalidOptionSpec { spec: String },

    #[error("No units selected")]
    #[diagnostic(
        code(plinth::plan::nothing_selected),
        help("Name units on the command line or list them under 'units' in .plinth/config.yaml")
    )]
    NothingSelected,

    // Install errors
    #[error("Installation of '{unit}' failed: {detail}")]
    #[diagnostic(
        code(plinth::install::failed),
        help("Progress has been saved. Fix the cause and run 'plinth install' again to resume")
    )]
    InstallFailed { unit: String, detail: String },

    #[error("Installation interrupted")]
    #[diagnostic(
        code(plinth::install::interrupted),
        help("Progress has been saved. Run 'plinth install' again to resume")
    )]
    Interrupted,

    // Concurrency errors
    #[error("Another installation is running against '{path}'")]
    #[diagnostic(
        code(plinth::concurrency::locked),
        help("Wait for the other process to finish and try again")
    )]
    ConcurrentInstallation { path: String },

    #[error("Failed to acquire project lock: {reason}")]
    #[diagnostic(code(plinth::concurrency::lock_failed))]
    LockFailed { reason: String },

    // State errors
    #[error("Failed to read install state '{path}': {reason}")]
    #[diagnostic(code(plinth::state::read_failed))]
    StateReadFailed { path: String, reason: String },

    #[error("Failed to write install state '{path}': {reason}")]
    #[diagnostic(code(plinth::state::write_failed))]
    StateWriteFailed { path: String, reason: String },

    #[error("Unsupported install state version {version}")]
    #[diagnostic(
        code(plinth::state::unsupported_version),
        help("The state file was written by a newer plinth")
    )]
    UnsupportedStateVersion { version: u32 },

    #[error("Unit '{unit}' cannot move from {from} to {to}")]
    #[diagnostic(code(plinth::state::invalid_transition))]
    InvalidStateTransition {
        unit: String,
        from: String,
        to: String,
    },

    #[error("No install record for unit '{unit}'")]
    #[diagnostic(code(plinth::state::record_not_found))]
    RecordNotFound { unit: String },

    // Project & configuration errors
    #[error("Project not found at: {path}")]
    #[diagnostic(
        code(plinth::project::not_found),
        help("Run 'plinth init' to initialize a project")
    )]
    ProjectNotFound { path: String },

    #[error("Failed to parse configuration file '{path}': {reason}")]
    #[diagnostic(code(plinth::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(plinth::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(plinth::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(plinth::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(plinth::fs::io_error))]
    IoError { message: String },
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("({a}, {b})"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl PlinthError {
    /// Classify this error for propagation decisions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogNotFound { .. }
            | Self::CatalogReadFailed { .. }
            | Self::CatalogParseFailed { .. }
            | Self::DuplicateUnit { .. }
            | Self::UnknownReference { .. }
            | Self::SelfDependency { .. }
            | Self::SelfConflict { .. }
            | Self::InvalidOption { .. }
            | Self::RequirementConflict { .. }
            | Self::InvalidInstallAction { .. } => ErrorCategory::Catalog,

            Self::UnknownUnit { .. }
            | Self::UnavailableUnit { .. }
            | Self::UnavailableRequirement { .. }
            | Self::CircularDependency { .. }
            | Self::Conflict { .. }
            | Self::UnknownOption { .. }
            | Self::InvalidOptionChoice { .. }
            | Self::InvalidOptionSpec { .. }
            | Self::NothingSelected => ErrorCategory::Plan,

            Self::InstallFailed { .. } | Self::Interrupted => ErrorCategory::Install,

            Self::ConcurrentInstallation { .. } | Self::LockFailed { .. } => {
                ErrorCategory::Concurrency
            }

            Self::StateReadFailed { .. }
            | Self::StateWriteFailed { .. }
            | Self::UnsupportedStateVersion { .. }
            | Self::InvalidStateTransition { .. }
            | Self::RecordNotFound { .. } => ErrorCategory::State,

            Self::ProjectNotFound { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. } => ErrorCategory::Config,

            Self::FileReadFailed { .. } | Self::FileWriteFailed { .. } | Self::IoError { .. } => {
                ErrorCategory::Io
            }
        }
    }
}

impl From<std::io::Error> for PlinthError {
    fn from(err: std::io::Error) -> Self {
        PlinthError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PlinthError {
    fn from(err: serde_yaml::Error) -> Self {
        PlinthError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PlinthError {
    fn from(err: serde_json::Error) -> Self {
        PlinthError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for PlinthError {
    fn from(err: inquire::InquireError) -> Self {
        PlinthError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PlinthError>;
