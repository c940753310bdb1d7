//! Subcommand implementations

pub mod export;
pub mod fetch;
pub mod import;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use genetable_alliance::GeneRecord;

fn kv_table(title: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    table
}

/// Print a key-value summary table on stderr
pub fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = kv_table(title);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

/// Print one gene as a column/value table on stdout, nulls dimmed
pub fn print_record(record: &GeneRecord) {
    let mut table = kv_table("Column");
    for (column, value) in record.fields() {
        let value = match value {
            Some(v) => Cell::new(v),
            None => Cell::new("null").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(column), value]);
    }
    println!("{table}");
}

/// Print one gene as pretty JSON on stdout
pub fn print_record_json(record: &GeneRecord) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
