//! Human-readable change report.

use crate::diff::formatter::{Formatter, Style};
use crate::model::ChangeSet;

/// Render the change set for the terminal
///
/// Collections are tab-indented with their change kind, identifiers
/// double-tab-indented in canonical form. Informational only; emission does
/// not read it.
pub fn render_change_report(changes: &ChangeSet, fmt: &dyn Formatter) -> String {
    if changes.is_empty() {
        return format!("{}\n", fmt.paint(Style::Alert, "No changes detected!"));
    }

    let mut out = String::new();
    out.push_str(&fmt.paint(Style::Heading, "All changed data: "));
    out.push('\n');
    for (name, change) in changes {
        out.push_str(&format!(
            "\t{} ({}, {})\n",
            fmt.paint(Style::Collection, name),
            change.kind,
            count_label(change.ids.len())
        ));
        for id in &change.ids {
            out.push_str(&format!(
                "\t\t{}\n",
                fmt.paint(Style::Identifier, &id.canonical())
            ));
        }
    }
    out
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "1 document".to_string()
    } else {
        format!("{} documents", n)
    }
}
