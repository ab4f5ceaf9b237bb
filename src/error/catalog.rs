//! Catalog validation errors

use super::PlinthError;

/// A `requires` or `conflicts` entry naming an undeclared unit
pub fn unknown_reference(
    unit: impl Into<String>,
    field: impl Into<String>,
    reference: impl Into<String>,
) -> PlinthError {
    PlinthError::UnknownReference {
        unit: unit.into(),
        field: field.into(),
        reference: reference.into(),
    }
}

/// An option declaration that cannot be satisfied
pub fn invalid_option(
    unit: impl Into<String>,
    option: impl Into<String>,
    reason: impl Into<String>,
) -> PlinthError {
    PlinthError::InvalidOption {
        unit: unit.into(),
        option: option.into(),
        reason: reason.into(),
    }
}

/// An install action the bundled installers refuse to run
pub fn invalid_install_action(unit: impl Into<String>, reason: impl Into<String>) -> PlinthError {
    PlinthError::InvalidInstallAction {
        unit: unit.into(),
        reason: reason.into(),
    }
}
