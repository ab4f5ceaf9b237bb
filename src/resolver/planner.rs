//! Installation planning
//!
//! Turns a selection into the ordered list of units that still need to be
//! installed. Planning is pure: it reads the catalog and a state snapshot and
//! never touches the project, so `plinth plan` and `plinth install --dry-run`
//! share it with the real install path.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{PlinthError, Result};
use crate::manifest::{Catalog, Unit};
use crate::resolver::conflict::ConflictDetector;
use crate::resolver::graph::DependencyGraph;
use crate::state::StateSnapshot;

/// Caller option choices: unit id -> option name -> value
pub type OptionChoices = BTreeMap<String, BTreeMap<String, String>>;

/// One unit to install, in plan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub unit_id: String,
    pub chosen_options: BTreeMap<String, String>,
    /// Direct requirements, ascending
    pub requires: Vec<String>,
    /// Pulled in by a requirement rather than selected
    pub auto_included: bool,
}

/// Ordered units still to install for a selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallationPlan {
    pub entries: Vec<PlanEntry>,
    /// Closure members skipped because they are already completed
    pub already_installed: Vec<String>,
}

impl InstallationPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.unit_id.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Computes installation plans against one catalog
#[derive(Debug, Clone, Copy)]
pub struct InstallationPlanner<'a> {
    catalog: &'a Catalog,
}

impl<'a> InstallationPlanner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Plan the installation of `selected`
    ///
    /// # Errors
    ///
    /// Any plan error aborts planning entirely; a partial plan is never
    /// returned.
    pub fn plan(
        &self,
        selected: &BTreeSet<String>,
        choices: &OptionChoices,
        snapshot: &StateSnapshot,
    ) -> Result<InstallationPlan> {
        if selected.is_empty() {
            return Err(PlinthError::NothingSelected);
        }

        for id in selected {
            let unit = self.catalog.unit(id)?;
            if !unit.status.is_installable() {
                return Err(PlinthError::UnavailableUnit {
                    id: id.clone(),
                    status: unit.status.to_string(),
                });
            }
        }

        let conflicts = ConflictDetector::new(self.catalog);
        conflicts.check(selected)?;

        let graph = DependencyGraph::build(self.catalog, selected)?;
        for id in graph.closure() {
            let unit = self.catalog.unit(id)?;
            if !unit.status.is_installable() {
                return Err(PlinthError::UnavailableRequirement {
                    id: id.clone(),
                    status: unit.status.to_string(),
                    required_by: graph.required_by(id).unwrap_or_default().to_string(),
                });
            }
        }

        let mut installed_view: BTreeSet<String> = graph.closure().cloned().collect();
        installed_view.extend(snapshot.completed_ids().cloned());
        conflicts.check(&installed_view)?;

        let order = graph.topological_order()?;

        for unit_id in choices.keys() {
            if !graph.contains(unit_id) {
                tracing::warn!(unit = %unit_id, "ignoring option choices for unit outside the plan");
            }
        }

        let mut plan = InstallationPlan::default();
        for id in order {
            if snapshot.is_completed(&id) {
                plan.already_installed.push(id);
                continue;
            }
            let unit = self.catalog.unit(&id)?;
            let chosen_options = resolve_options(unit, choices.get(&id))?;
            plan.entries.push(PlanEntry {
                auto_included: graph.is_auto_included(&id),
                requires: unit.requires.iter().cloned().collect(),
                unit_id: id,
                chosen_options,
            });
        }

        tracing::debug!(
            selected = selected.len(),
            closure = graph.len(),
            planned = plan.entries.len(),
            already_installed = plan.already_installed.len(),
            order = ?plan.unit_ids().collect::<Vec<_>>(),
            "computed installation plan"
        );
        Ok(plan)
    }
}

/// Defaults overlaid with validated caller choices
fn resolve_options(
    unit: &Unit,
    choices: Option<&BTreeMap<String, String>>,
) -> Result<BTreeMap<String, String>> {
    let mut resolved = unit.default_options();
    let Some(choices) = choices else {
        return Ok(resolved);
    };

    for (name, value) in choices {
        let option = unit
            .options
            .get(name)
            .ok_or_else(|| PlinthError::UnknownOption {
                unit: unit.id.clone(),
                option: name.clone(),
            })?;
        if !option.allows(value) {
            return Err(PlinthError::InvalidOptionChoice {
                unit: unit.id.clone(),
                option: name.clone(),
                value: value.clone(),
                allowed: option.values.join(", "),
            });
        }
        resolved.insert(name.clone(), value.clone());
    }
    Ok(resolved)
}
