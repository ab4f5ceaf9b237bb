//! List command implementation
//!
//! Lists catalog units grouped by category with their install state.

use crate::cli::ListArgs;
use crate::commands::context::Context;
use crate::error::Result;
use crate::ui::display;

/// Run list command
pub fn run(ctx: &Context, args: &ListArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let store = ctx.project.read_state()?;

    if catalog.is_empty() {
        println!("Catalog has no units.");
        return Ok(());
    }

    display::display_catalog(&catalog, store.snapshot(), args.all);
    Ok(())
}
