//! Validate command implementation

use console::Style;

use crate::commands::context::Context;
use crate::error::Result;

/// Run validate command
pub fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    if !ctx.quiet {
        let label = catalog.name().unwrap_or(catalog.origin());
        println!(
            "{} {} ({} {})",
            Style::new().green().bold().apply_to("Valid:"),
            label,
            catalog.len(),
            if catalog.len() == 1 { "unit" } else { "units" }
        );
        println!("  {} {}", Style::new().bold().apply_to("Digest:"), catalog.digest());
    }
    Ok(())
}
