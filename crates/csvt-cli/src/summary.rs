//! Post-run summary for extract-map, written to stderr.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use csvt_map::ExtractStats;

use crate::cli::SummaryArg;

pub fn print_summary(mode: SummaryArg, stats: &ExtractStats, map_file: &Path) {
    match mode {
        SummaryArg::None => {}
        SummaryArg::Table => print_table(stats, map_file),
        SummaryArg::Json => print_json(stats, map_file),
    }
}

fn print_table(stats: &ExtractStats, map_file: &Path) {
    let mut table = Table::new();
    table.set_header(vec!["Rows", "Reused", "Minted", "Mappings", "Max ref"]);
    apply_table_style(&mut table);
    table.add_row(vec![
        stats.rows.to_string(),
        (stats.rows - stats.minted).to_string(),
        stats.minted.to_string(),
        stats.total_mappings.to_string(),
        stats.max_ref.to_string(),
    ]);
    eprintln!("Map store: {}", map_file.display());
    eprintln!("{table}");
}

fn print_json(stats: &ExtractStats, map_file: &Path) {
    let summary = serde_json::json!({
        "map_file": map_file.display().to_string(),
        "stats": stats,
    });
    eprintln!("{summary}");
}

fn apply_table_style(table: &mut Table) {
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }
}
