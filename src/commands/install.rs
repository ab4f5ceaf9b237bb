//! Install command implementation
//!
//! Resolves the selection, takes the project lock and runs the plan through
//! the bundled installers. Ctrl-C stops the run after the current unit.

use std::collections::BTreeSet;

use crate::cli::InstallArgs;
use crate::commands::context::Context;
use crate::commands::prompt;
use crate::config::merge_option_specs;
use crate::engine::{CancellationToken, ExecutionEngine, FailureMode};
use crate::error::{PlinthError, Result, fs as fs_error};
use crate::installer::CatalogInstaller;
use crate::manifest::Catalog;
use crate::resolver::{InstallationPlanner, OptionChoices};
use crate::state::{InstallState, StateSnapshot};
use crate::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter, display};

/// Run install command
pub fn run(ctx: &mut Context, args: &InstallArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    if args.dry_run {
        let store = ctx.project.read_state()?;
        let (selected, choices) = select_units(ctx, args, &catalog, store.snapshot())?;
        let plan = InstallationPlanner::new(&catalog).plan(&selected, &choices, store.snapshot())?;
        display::display_plan(&plan);
        return Ok(());
    }

    ctx.ensure_initialized()?;
    // Lock before planning so the plan is computed against state no one else is changing
    let mut store = ctx.project.open_state()?;
    let (selected, choices) = select_units(ctx, args, &catalog, store.snapshot())?;
    let plan = InstallationPlanner::new(&catalog).plan(&selected, &choices, store.snapshot())?;

    if !ctx.quiet {
        display::display_plan(&plan);
    }
    if plan.is_empty() {
        return Ok(());
    }

    if !args.yes && prompt::is_interactive() && !prompt::confirm("Proceed with installation?")? {
        println!("Installation cancelled.");
        return Ok(());
    }

    store.set_catalog_digest(catalog.digest());

    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel)?;

    let failure_mode = if args.continue_on_error || ctx.project.config.continue_on_error {
        FailureMode::ContinueOnError
    } else {
        FailureMode::FailFast
    };

    let installer = CatalogInstaller::new(&catalog);
    let engine = ExecutionEngine::new(&installer, &ctx.project.root)
        .with_failure_mode(failure_mode)
        .with_cancellation(cancel);

    let mut progress: Box<dyn ProgressReporter> = if ctx.quiet {
        Box::new(SilentProgressReporter)
    } else {
        Box::new(InteractiveProgressReporter::new(plan.len() as u64))
    };

    let report = engine.execute(&plan, &mut store, progress.as_mut())?;

    if !ctx.quiet {
        display::display_report(&report);
    }
    match report.to_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Units to install and their option choices
///
/// Without named units: config, then the recorded selection, then an
/// interactive pick. A resumed selection keeps the options it was started
/// with; `--option` still overrides them.
fn select_units(
    ctx: &Context,
    args: &InstallArgs,
    catalog: &Catalog,
    snapshot: &StateSnapshot,
) -> Result<(BTreeSet<String>, OptionChoices)> {
    let config = &ctx.project.config;
    let with_flags = |base: &OptionChoices| merge_option_specs(base, &args.options);

    if !args.units.is_empty() {
        return Ok((args.units.iter().cloned().collect(), with_flags(&config.options)?));
    }
    if !config.units.is_empty() {
        return Ok((config.units.iter().cloned().collect(), with_flags(&config.options)?));
    }

    let recorded: BTreeSet<String> = snapshot.records().map(|r| r.unit_id.clone()).collect();
    if !recorded.is_empty() {
        tracing::debug!(units = recorded.len(), "resuming recorded selection");
        let mut base = config.options.clone();
        for (unit, options) in recorded_choices(catalog, snapshot) {
            base.entry(unit).or_default().extend(options);
        }
        return Ok((recorded, with_flags(&base)?));
    }

    if !args.yes && prompt::is_interactive() {
        let picked = prompt::select_units(catalog)?;
        if !picked.is_empty() {
            return Ok((picked.into_iter().collect(), with_flags(&config.options)?));
        }
    }
    Err(PlinthError::NothingSelected)
}

/// Options recorded for units that have not completed yet
///
/// Choices the catalog no longer accepts are dropped, so the unit falls back
/// to its current default.
fn recorded_choices(catalog: &Catalog, snapshot: &StateSnapshot) -> OptionChoices {
    let mut choices = OptionChoices::new();
    for record in snapshot.records() {
        if record.state == InstallState::Completed {
            continue;
        }
        let Some(unit) = catalog.get(&record.unit_id) else {
            continue;
        };
        for (name, value) in &record.chosen_options {
            if unit.options.get(name).is_some_and(|o| o.allows(value)) {
                choices
                    .entry(record.unit_id.clone())
                    .or_default()
                    .insert(name.clone(), value.clone());
            } else {
                tracing::warn!(
                    unit = %record.unit_id,
                    option = %name,
                    value = %value,
                    "dropping recorded option the catalog no longer allows"
                );
            }
        }
    }
    choices
}

fn install_interrupt_handler(cancel: &CancellationToken) -> Result<()> {
    let token = cancel.clone();
    ctrlc::set_handler(move || {
        if !token.is_cancelled() {
            eprintln!("\nInterrupt received; stopping after the current unit");
        }
        token.cancel();
    })
    .map_err(|e| fs_error::io_error(format!("Failed to install interrupt handler: {e}")))
}
