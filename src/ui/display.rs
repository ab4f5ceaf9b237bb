//! Display functions for catalogs, plans and install state
//!
//! Everything here prints to stdout; diagnostics and logs go to stderr.

use std::collections::BTreeMap;

use console::{Style, StyledObject};

use crate::engine::{ExecutionReport, UnitOutcome};
use crate::manifest::{Catalog, Category, Unit};
use crate::resolver::InstallationPlan;
use crate::state::{InstallRecord, InstallState, StateSnapshot};

macro_rules! display_opt_field {
    ($label:expr, $value:expr) => {
        if let Some(ref v) = $value {
            println!("  {} {}", Style::new().bold().apply_to($label), v);
        }
    };
}

/// `linter=ruff, types=mypy`, or `-` when there are no options
pub fn format_options(options: &BTreeMap<String, String>) -> String {
    if options.is_empty() {
        return "-".to_string();
    }
    options
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Install state colored for the terminal
pub fn state_label(state: InstallState) -> StyledObject<&'static str> {
    let style = match state {
        InstallState::Completed => Style::new().green(),
        InstallState::Failed => Style::new().red(),
        InstallState::InProgress => Style::new().yellow(),
        InstallState::Pending => Style::new().dim(),
    };
    style.apply_to(state.as_str())
}

/// Display an installation plan in order
pub fn display_plan(plan: &InstallationPlan) {
    if !plan.already_installed.is_empty() {
        println!(
            "{} {}",
            Style::new().bold().apply_to("Already installed:"),
            plan.already_installed.join(", ")
        );
    }

    if plan.is_empty() {
        println!("Nothing to install.");
        return;
    }

    println!(
        "{} ({} {})",
        Style::new().bold().apply_to("Installation plan"),
        plan.len(),
        if plan.len() == 1 { "unit" } else { "units" }
    );
    for (index, entry) in plan.entries.iter().enumerate() {
        let mut line = format!(
            "  {:>2}. {}",
            index + 1,
            Style::new().bold().yellow().apply_to(&entry.unit_id)
        );
        if entry.auto_included {
            line.push_str(&format!(" {}", Style::new().dim().apply_to("(required)")));
        }
        if !entry.chosen_options.is_empty() {
            line.push_str(&format!(
                " {}",
                Style::new().cyan().apply_to(format_options(&entry.chosen_options))
            ));
        }
        println!("{line}");
    }
}

/// Display the result of an install run
pub fn display_report(report: &ExecutionReport) {
    let completed = report.count(|o| *o == UnitOutcome::Completed);
    let failed = report.count(|o| matches!(o, UnitOutcome::Failed { .. }));
    let skipped = report.count(|o| matches!(o, UnitOutcome::Skipped { .. }));
    let not_started = report.count(|o| *o == UnitOutcome::NotStarted);

    for unit in &report.units {
        match &unit.outcome {
            UnitOutcome::Failed { detail } => println!(
                "  {} {}: {}",
                Style::new().red().apply_to("failed"),
                unit.unit_id,
                detail
            ),
            UnitOutcome::Skipped { blocked_by } => println!(
                "  {} {} (blocked by {})",
                Style::new().yellow().apply_to("skipped"),
                unit.unit_id,
                blocked_by
            ),
            UnitOutcome::Completed | UnitOutcome::NotStarted => {}
        }
    }

    let summary = format!(
        "{completed} completed, {failed} failed, {skipped} skipped, {not_started} not started"
    );
    if report.is_success() {
        println!("{} {}", Style::new().green().bold().apply_to("Done:"), summary);
    } else {
        println!("{} {}", Style::new().red().bold().apply_to("Incomplete:"), summary);
    }
}

/// Display install records as a table
pub fn display_status(snapshot: &StateSnapshot) {
    if snapshot.is_empty() {
        println!("No units recorded.");
        return;
    }

    let width = snapshot
        .records()
        .map(|r| r.unit_id.len())
        .max()
        .unwrap_or(0);
    for record in snapshot.records() {
        println!(
            "  {:<width$}  {:<11}  {}",
            record.unit_id,
            state_label(record.state),
            format_options(&record.chosen_options),
        );
        if let Some(ref detail) = record.error_detail {
            println!("  {:<width$}  {}", "", Style::new().red().apply_to(detail));
        }
    }
    println!();
    println!(
        "{} completed, {} failed, {} pending, {} in progress",
        snapshot.count(InstallState::Completed),
        snapshot.count(InstallState::Failed),
        snapshot.count(InstallState::Pending),
        snapshot.count(InstallState::InProgress),
    );
}

/// Display catalog units grouped by category
pub fn display_catalog(catalog: &Catalog, snapshot: &StateSnapshot, all: bool) {
    for category in Category::ALL {
        let units: Vec<&Unit> = catalog
            .units()
            .filter(|u| u.category == category)
            .filter(|u| all || u.status.is_installable())
            .collect();
        if units.is_empty() {
            continue;
        }

        println!("{}", Style::new().bold().apply_to(category.as_str()));
        for unit in units {
            let mut line = format!("  {}", Style::new().bold().yellow().apply_to(&unit.id));
            if !unit.status.is_installable() {
                line.push_str(&format!(" {}", Style::new().dim().apply_to(unit.status)));
            }
            if let Some(state) = snapshot.state_of(&unit.id) {
                line.push_str(&format!(" [{}]", state_label(state)));
            }
            if let Some(ref description) = unit.description {
                line.push_str(&format!(" - {description}"));
            }
            println!("{line}");
        }
        println!();
    }
}

/// Display one unit with its requirement closure and record
pub fn display_unit(unit: &Unit, closure: &[String], record: Option<&InstallRecord>) {
    println!("{}", Style::new().bold().yellow().apply_to(&unit.id));
    display_opt_field!("Description:", unit.description);
    println!("  {} {}", Style::new().bold().apply_to("Category:"), unit.category);
    println!("  {} {}", Style::new().bold().apply_to("Status:"), unit.status);

    if !unit.requires.is_empty() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Requires:"),
            unit.requires.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    if closure.len() > unit.requires.len() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Installs with:"),
            closure.join(", ")
        );
    }
    if !unit.conflicts.is_empty() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Conflicts:"),
            unit.conflicts.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    if !unit.options.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Options:"));
        for (name, option) in &unit.options {
            let values: Vec<String> = option
                .values
                .iter()
                .map(|v| {
                    if *v == option.default {
                        format!("{v} (default)")
                    } else {
                        v.clone()
                    }
                })
                .collect();
            println!("    {} {}", Style::new().cyan().apply_to(name), values.join(" | "));
        }
    }

    match record {
        Some(record) => {
            println!(
                "  {} {}",
                Style::new().bold().apply_to("State:"),
                state_label(record.state)
            );
            display_opt_field!("Error:", record.error_detail);
        }
        None => println!(
            "  {} {}",
            Style::new().bold().apply_to("State:"),
            Style::new().dim().apply_to("not installed")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_options() {
        assert_eq!(format_options(&BTreeMap::new()), "-");

        let mut options = BTreeMap::new();
        options.insert("types".to_string(), "mypy".to_string());
        options.insert("linter".to_string(), "ruff".to_string());
        assert_eq!(format_options(&options), "linter=ruff, types=mypy");
    }
}
