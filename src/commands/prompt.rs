//! Interactive prompts
//!
//! Prompts are only shown when stdin is a terminal; callers fall back to
//! non-interactive behavior otherwise.

use std::io::IsTerminal;

use inquire::{Confirm, MultiSelect};

use crate::error::Result;
use crate::manifest::Catalog;

/// Whether prompts can be shown
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Let the user pick installable units from the catalog
///
/// Returns an empty list when the prompt is cancelled.
pub fn select_units(catalog: &Catalog) -> Result<Vec<String>> {
    let items: Vec<String> = catalog
        .units()
        .filter(|u| u.status.is_installable())
        .map(|u| match u.description {
            Some(ref description) => format!("{} - {}", u.id, description),
            None => u.id.clone(),
        })
        .collect();

    if items.is_empty() {
        return Ok(Vec::new());
    }

    println!();
    let selection = MultiSelect::new("Select units to install", items)
        .with_page_size(10)
        .with_help_message("  ↑↓ navigate  space select  enter confirm  type to filter  esc cancel")
        .prompt_skippable()?
        .unwrap_or_default();

    // Map display strings back to unit ids (id is the part before " - ")
    Ok(selection
        .iter()
        .map(|s| s.split(" - ").next().unwrap_or(s).trim().to_string())
        .collect())
}

/// Ask a yes/no question, defaulting to yes
pub fn confirm(message: &str) -> Result<bool> {
    Ok(Confirm::new(message)
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to cancel")
        .prompt()?)
}
