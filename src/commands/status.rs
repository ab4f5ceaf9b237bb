//! Status command implementation

use console::Style;

use crate::cli::StatusArgs;
use crate::commands::context::Context;
use crate::error::Result;
use crate::state::render;
use crate::ui::display;

/// Run status command
pub fn run(ctx: &Context, args: &StatusArgs) -> Result<()> {
    let store = ctx.project.read_state()?;
    let snapshot = store.snapshot();

    // Status is still useful when the catalog is broken or gone
    let catalog = match ctx.load_catalog() {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable; showing records only");
            None
        }
    };

    if let (Some(catalog), Some(recorded)) = (&catalog, snapshot.catalog_digest()) {
        if catalog.digest() != recorded {
            eprintln!(
                "{} the catalog changed since the install state was written",
                Style::new().yellow().bold().apply_to("Warning:")
            );
        }
    }

    if args.markdown {
        print!("{}", render::render_markdown(snapshot, catalog.as_ref()));
    } else {
        display::display_status(snapshot);
    }
    Ok(())
}
