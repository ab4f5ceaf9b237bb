//! Show command implementation

use std::collections::BTreeSet;

use crate::cli::ShowArgs;
use crate::commands::context::Context;
use crate::error::Result;
use crate::resolver::DependencyGraph;
use crate::ui::display;

/// Run show command
pub fn run(ctx: &Context, args: &ShowArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let unit = catalog.unit(&args.unit)?;
    let store = ctx.project.read_state()?;

    let selected = BTreeSet::from([unit.id.clone()]);
    let graph = DependencyGraph::build(&catalog, &selected)?;
    let closure: Vec<String> = graph
        .topological_order()?
        .into_iter()
        .filter(|id| *id != unit.id)
        .collect();

    display::display_unit(unit, &closure, store.record(&unit.id));
    Ok(())
}
