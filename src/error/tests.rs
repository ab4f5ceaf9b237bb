//! Error type tests
//!
//! Tests for PlinthError, its categories and conversions.

#![allow(clippy::expect_used)]

use std::path::Path;

use crate::error::catalog::{invalid_install_action, invalid_option, unknown_reference};
use crate::error::fs::{io_error, read_failed as file_read_failed};
use crate::error::plan::{circular, conflict};
use crate::error::state::invalid_transition;
use crate::error::{ErrorCategory, PlinthError};
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

fn code_of(err: &PlinthError) -> Option<String> {
    err.code().map(|c| c.to_string())
}

#[test]
fn test_error_display() {
    let err = PlinthError::UnknownUnit {
        id: "languages/cobol".to_string(),
    };
    assert_eq!(err.to_string(), "Unit 'languages/cobol' not found in catalog");
}

#[test]
fn test_error_code() {
    let err = PlinthError::UnknownUnit {
        id: "x".to_string(),
    };
    assert_eq!(code_of(&err), Some("plinth::plan::unknown_unit".to_string()));
}

#[test]
fn test_help_mentions_resume() {
    let err = PlinthError::InstallFailed {
        unit: "tools/docker".to_string(),
        detail: "exit status 1".to_string(),
    };
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("resume"), "help was: {help}");
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PlinthError = io_err.into();
    assert!(matches!(err, PlinthError::IoError { .. }));
    assert_eq!(err.category(), ErrorCategory::Io);
}

#[test]
fn test_yaml_error_conversion() {
    let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").expect_err("invalid yaml");
    let err: PlinthError = yaml_err.into();
    assert!(matches!(err, PlinthError::ConfigParseFailed { .. }));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<Vec<String>>("{").expect_err("invalid json");
    let err: PlinthError = json_err.into();
    assert!(matches!(err, PlinthError::ConfigParseFailed { .. }));
}

#[test]
fn test_cycle_chain() {
    let err = circular(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
    assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> a");
    assert_eq!(err.category(), ErrorCategory::Plan);
}

#[test]
fn test_conflict_lists_every_pair() {
    let err = conflict(vec![
        ("b".to_string(), "c".to_string()),
        ("d".to_string(), "e".to_string()),
    ]);
    assert_eq!(
        err.to_string(),
        "Conflicting units selected: (b, c), (d, e)"
    );
    assert_eq!(code_of(&err), Some("plinth::plan::conflict".to_string()));
}

#[test]
fn test_categories() {
    let cases = [
        (
            PlinthError::DuplicateUnit { id: "a".to_string() },
            ErrorCategory::Catalog,
        ),
        (PlinthError::NothingSelected, ErrorCategory::Plan),
        (PlinthError::Interrupted, ErrorCategory::Install),
        (
            PlinthError::ConcurrentInstallation {
                path: "/p".to_string(),
            },
            ErrorCategory::Concurrency,
        ),
        (
            PlinthError::UnsupportedStateVersion { version: 9 },
            ErrorCategory::State,
        ),
        (
            PlinthError::ProjectNotFound {
                path: "/p".to_string(),
            },
            ErrorCategory::Config,
        ),
        (file_read_failed(Path::new("/x"), "denied"), ErrorCategory::Io),
    ];

    for (err, expected) in cases {
        assert_eq!(err.category(), expected, "category of {err}");
    }
}

test_error_contains!(
    test_unknown_reference_message,
    unknown_reference("apps/web", "requires", "languages/elm"),
    "apps/web",
    "requires",
    "languages/elm"
);

test_error_contains!(
    test_invalid_option_message,
    invalid_option("languages/python", "linter", "default 'pylint' is not an allowed value"),
    "languages/python",
    "linter",
    "pylint"
);

test_error_contains!(
    test_invalid_install_action_message,
    invalid_install_action("standards/lint", "copy destination escapes the project"),
    "standards/lint",
    "escapes"
);

test_error_contains!(
    test_invalid_transition_message,
    invalid_transition("a", "pending", "completed"),
    "'a'",
    "pending",
    "completed"
);

test_error_contains!(
    test_concurrent_installation_message,
    PlinthError::ConcurrentInstallation {
        path: "/work/project".to_string()
    },
    "Another installation",
    "/work/project"
);

test_error_contains!(
    test_unavailable_requirement_message,
    PlinthError::UnavailableRequirement {
        id: "tools/nix".to_string(),
        status: "planned".to_string(),
        required_by: "apps/desktop".to_string(),
    },
    "tools/nix",
    "apps/desktop",
    "planned"
);

test_error_contains!(test_io_error_message, io_error("disk full"), "disk full");
