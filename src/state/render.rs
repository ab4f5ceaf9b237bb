//! Markdown projection of install state
//!
//! Used by `plinth status --markdown` to produce a report that can be pasted
//! into an issue or a project README.

use std::fmt::Write;

use crate::manifest::Catalog;
use crate::state::record::{InstallRecord, InstallState};
use crate::state::snapshot::StateSnapshot;

/// Render all records as a Markdown table followed by a summary line
///
/// Categories come from `catalog` when given; units no longer in the catalog
/// show `-`.
pub fn render_markdown(snapshot: &StateSnapshot, catalog: Option<&Catalog>) -> String {
    let mut out = String::from("# Install state\n\n");

    if snapshot.is_empty() {
        out.push_str("_No units recorded._\n");
        return out;
    }

    out.push_str("| Unit | Category | State | Options | Detail |\n");
    out.push_str("|------|----------|-------|---------|--------|\n");
    for record in snapshot.records() {
        let category = catalog
            .and_then(|c| c.get(&record.unit_id))
            .map_or("-", |u| u.category.as_str());
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            escape(&record.unit_id),
            category,
            record.state,
            escape(&format_options(record)),
            escape(record.error_detail.as_deref().unwrap_or("")),
        );
    }

    let _ = writeln!(
        out,
        "\n{} completed, {} failed, {} pending, {} in progress",
        snapshot.count(InstallState::Completed),
        snapshot.count(InstallState::Failed),
        snapshot.count(InstallState::Pending),
        snapshot.count(InstallState::InProgress),
    );
    out
}

fn format_options(record: &InstallRecord) -> String {
    record
        .chosen_options
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table cells may not contain pipes or newlines
fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\n', '\r'], " ")
}
