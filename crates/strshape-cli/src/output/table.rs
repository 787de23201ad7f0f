//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use strshape::MergedTable;

/// Format one merged table's signatures as an ASCII table.
pub fn format_signature_table(merged: &MergedTable) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Parameters", "Locales"]);

    for entry in merged.entries.values() {
        let params = if entry.params.is_empty() {
            "-".to_string()
        } else {
            entry
                .params
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        };
        let locales = entry
            .locales
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![entry.key.clone(), params, locales]);
    }

    table
}
