//! `UNIT:NAME=VALUE` option specs
//!
//! Unit ids contain `/` but never `:` or `=`, so the first `=` ends the
//! option name and the last `:` before it ends the unit id.

use crate::error::{PlinthError, Result};
use crate::resolver::OptionChoices;

/// Split `languages/python:linter=ruff` into its three parts
pub fn parse_option_spec(spec: &str) -> Result<(String, String, String)> {
    let invalid = || PlinthError::InvalidOptionSpec {
        spec: spec.to_string(),
    };

    let (target, value) = spec.split_once('=').ok_or_else(invalid)?;
    let (unit, name) = target.rsplit_once(':').ok_or_else(invalid)?;
    let (unit, name, value) = (unit.trim(), name.trim(), value.trim());

    if unit.is_empty() || name.is_empty() || value.is_empty() {
        return Err(invalid());
    }
    Ok((unit.to_string(), name.to_string(), value.to_string()))
}

/// Overlay command line specs on the configured choices
pub fn merge_option_specs(base: &OptionChoices, specs: &[String]) -> Result<OptionChoices> {
    let mut merged = base.clone();
    for spec in specs {
        let (unit, name, value) = parse_option_spec(spec)?;
        merged.entry(unit).or_default().insert(name, value);
    }
    Ok(merged)
}
