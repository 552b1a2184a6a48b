//! Output formatting helpers for CLI commands

use crate::tuning::TuningParameters;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Parameters that scale with memory; everything else is baseline.
const DERIVED: [&str; 3] = [
    "max_connections",
    "innodb_buffer_pool_size",
    "read_buffer_size",
];

/// Format parameters as a table, marking which values were derived.
pub fn format_parameters_table(params: &TuningParameters) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Parameter", "Value", "Source"]);

    for (key, value) in params.entries() {
        let source = if DERIVED.contains(&key) {
            "derived".green().to_string()
        } else {
            "baseline".dimmed().to_string()
        };
        table.add_row(vec![Cell::new(key), Cell::new(value), Cell::new(source)]);
    }

    table.to_string()
}

/// Format parameters as pretty JSON.
pub fn format_parameters_json(params: &TuningParameters) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(params)
}
