use anyhow::{Context, Result};

use crate::model::capability::Capability;

pub const EMPTY_TABLE_MESSAGE: &str = "No capabilities found";

const HEADER: [&str; 4] = ["NAME", "SCOPE", "TYPE", "DESCRIPTION"];
/// Spaces between aligned columns.
const COLUMN_PADDING: usize = 3;

/// Pretty-printed JSON array; an empty set is `[]`.
pub fn render_json(capabilities: &[Capability]) -> Result<String> {
    serde_json::to_string_pretty(capabilities).context("Error formatting JSON")
}

/// Four aligned columns with a header row. Every column but the last is
/// padded to its widest cell; the last is written as-is.
pub fn render_table(capabilities: &[Capability]) -> String {
    if capabilities.is_empty() {
        return format!("{EMPTY_TABLE_MESSAGE}\n");
    }

    let rows: Vec<[&str; 4]> = std::iter::once(HEADER)
        .chain(capabilities.iter().map(|capability| {
            [
                capability.name(),
                capability.scope().as_str(),
                capability.kind().as_str(),
                capability.description(),
            ]
        }))
        .collect();

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        for (width, cell) in widths.iter().zip(row) {
            out.push_str(cell);
            let pad = width + COLUMN_PADDING - cell.chars().count();
            out.extend(std::iter::repeat_n(' ', pad));
        }
        out.push_str(row[3]);
        out.push('\n');
    }
    out
}
