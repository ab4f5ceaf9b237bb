//! Catalog validation
//!
//! Every check here runs at load time so a malformed catalog is rejected
//! before any installation step. Units are checked in ascending id order so the
//! first reported error is stable across runs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};

use crate::error::{PlinthError, Result, catalog};
use crate::manifest::unit::{InstallAction, Unit};

/// Run all per-unit and cross-unit checks
pub fn validate_units(units: &BTreeMap<String, Unit>) -> Result<()> {
    for unit in units.values() {
        check_references(unit, units)?;
        check_options(unit)?;
        check_install_action(unit)?;
    }

    for unit in units.values() {
        check_requirement_conflicts(unit, units)?;
    }

    Ok(())
}

fn check_references(unit: &Unit, units: &BTreeMap<String, Unit>) -> Result<()> {
    for dep in &unit.requires {
        if dep == &unit.id {
            return Err(PlinthError::SelfDependency {
                unit: unit.id.clone(),
            });
        }
        if !units.contains_key(dep) {
            return Err(catalog::unknown_reference(&unit.id, "requires", dep));
        }
    }

    for other in &unit.conflicts {
        if other == &unit.id {
            return Err(PlinthError::SelfConflict {
                unit: unit.id.clone(),
            });
        }
        if !units.contains_key(other) {
            return Err(catalog::unknown_reference(&unit.id, "conflicts", other));
        }
    }

    Ok(())
}

fn check_options(unit: &Unit) -> Result<()> {
    for (name, option) in &unit.options {
        if option.values.is_empty() {
            return Err(catalog::invalid_option(
                &unit.id,
                name,
                "no allowed values declared",
            ));
        }

        let distinct: BTreeSet<&String> = option.values.iter().collect();
        if distinct.len() != option.values.len() {
            return Err(catalog::invalid_option(
                &unit.id,
                name,
                "allowed values contain duplicates",
            ));
        }

        if !option.allows(&option.default) {
            return Err(catalog::invalid_option(
                &unit.id,
                name,
                format!(
                    "default '{}' is not one of: {}",
                    option.default,
                    option.values.join(", ")
                ),
            ));
        }
    }
    Ok(())
}

fn check_install_action(unit: &Unit) -> Result<()> {
    match &unit.install {
        None => Ok(()),
        Some(InstallAction::Command { command }) => {
            if command.trim().is_empty() {
                Err(catalog::invalid_install_action(&unit.id, "empty command"))
            } else {
                Ok(())
            }
        }
        Some(InstallAction::Copy { copy }) => {
            if !stays_inside(&copy.to) {
                return Err(catalog::invalid_install_action(
                    &unit.id,
                    format!(
                        "copy destination '{}' must be a relative path inside the project",
                        copy.to.display()
                    ),
                ));
            }
            if copy.from.as_os_str().is_empty() {
                return Err(catalog::invalid_install_action(
                    &unit.id,
                    "copy source is empty",
                ));
            }
            Ok(())
        }
    }
}

/// Relative path without `..`, root or prefix components
fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// A unit conflicting with something it (transitively) requires can never be installed
///
/// Either side may declare the conflict.
fn check_requirement_conflicts(unit: &Unit, units: &BTreeMap<String, Unit>) -> Result<()> {
    let closure = requirement_closure(&unit.id, units);
    let conflicting = closure.iter().find(|other| {
        unit.conflicts.contains(*other)
            || units
                .get(other.as_str())
                .is_some_and(|o| o.conflicts.contains(&unit.id))
    });

    if let Some(other) = conflicting {
        return Err(PlinthError::RequirementConflict {
            unit: unit.id.clone(),
            other: other.clone(),
        });
    }
    Ok(())
}

/// Transitive requirements of `id`, excluding `id` itself. Tolerates cycles.
pub(crate) fn requirement_closure(id: &str, units: &BTreeMap<String, Unit>) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&str> = vec![id];

    while let Some(current) = stack.pop() {
        let Some(unit) = units.get(current) else {
            continue;
        };
        for dep in &unit.requires {
            if seen.insert(dep.clone()) {
                stack.push(dep);
            }
        }
    }

    seen.remove(id);
    seen
}
