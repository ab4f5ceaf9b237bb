//! Init command implementation

use console::Style;

use crate::commands::context::Context;
use crate::error::Result;
use crate::project::Project;

/// Run init command
pub fn run(ctx: &Context) -> Result<()> {
    let root = &ctx.project.root;
    let existed = Project::exists(root);
    let project = Project::init(root, ctx.catalog_override().map(Into::into))?;

    if !ctx.quiet {
        let verb = if existed { "Reinitialized" } else { "Initialized" };
        println!(
            "{} plinth project in {}",
            Style::new().green().bold().apply_to(verb),
            project.plinth_dir.display()
        );
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Catalog:"),
            project.catalog_path(None).display()
        );
    }
    Ok(())
}
