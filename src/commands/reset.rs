//! Reset command implementation
//!
//! Moves `failed` records back to `pending` so the next install retries them.
//! Install already retries failed units it plans; reset is for clearing a
//! failure without installing.

use console::Style;

use crate::cli::ResetArgs;
use crate::commands::context::Context;
use crate::commands::prompt;
use crate::error::{PlinthError, Result, state};
use crate::state::InstallState;

/// Run reset command
pub fn run(ctx: &Context, args: &ResetArgs) -> Result<()> {
    let mut store = ctx.project.open_state()?;

    // Check everything first so a typo does not leave a partial reset
    for unit in &args.units {
        let record = store.record(unit).ok_or_else(|| PlinthError::RecordNotFound {
            unit: unit.clone(),
        })?;
        if record.state != InstallState::Failed {
            return Err(state::invalid_transition(
                unit,
                record.state,
                InstallState::Pending,
            ));
        }
    }

    if !args.yes && prompt::is_interactive() {
        println!("\nThe following unit(s) will be reset to pending:");
        for unit in &args.units {
            println!("  - {unit}");
        }
        println!();
        if !prompt::confirm("Proceed with reset?")? {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    for unit in &args.units {
        store.reset_failed(unit)?;
        if !ctx.quiet {
            println!(
                "{} {}",
                Style::new().green().bold().apply_to("Reset"),
                unit
            );
        }
    }
    Ok(())
}
