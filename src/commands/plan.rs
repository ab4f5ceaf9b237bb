//! Plan command implementation
//!
//! Computes the plan exactly as `install` would, without taking the lock or
//! writing anything.

use std::collections::BTreeSet;

use crate::cli::PlanArgs;
use crate::commands::context::Context;
use crate::config::merge_option_specs;
use crate::error::Result;
use crate::resolver::InstallationPlanner;
use crate::ui::display;

/// Run plan command
pub fn run(ctx: &Context, args: &PlanArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let store = ctx.project.read_state()?;
    let choices = merge_option_specs(&ctx.project.config.options, &args.options)?;

    let selected: BTreeSet<String> = if args.units.is_empty() {
        ctx.project.config.units.iter().cloned().collect()
    } else {
        args.units.iter().cloned().collect()
    };

    let plan = InstallationPlanner::new(&catalog).plan(&selected, &choices, store.snapshot())?;

    if args.json {
        println!("{}", plan.to_json()?);
    } else {
        display::display_plan(&plan);
    }
    Ok(())
}
