use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ticket_model::{GroupSummary, RunOutcome};

pub fn print_summary(outcome: &RunOutcome) {
    println!("New Excel file created: {}", outcome.output_path.display());
    println!("{}", summary_table(outcome));
    if !outcome.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &outcome.warnings {
            eprintln!("- {warning}");
        }
    }
}

fn summary_table(outcome: &RunOutcome) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("Sheet"),
            header_cell("Rows"),
            header_cell("Status"),
        ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new("All").add_attribute(Attribute::Bold),
        Cell::new(outcome.rows_written),
        Cell::new(format!("{} highlighted", outcome.highlighted_rows)).fg(Color::Red),
    ]);
    for group in &outcome.groups {
        table.add_row(group_row(group));
    }
    table
}

fn group_row(group: &GroupSummary) -> Vec<Cell> {
    match &group.skipped {
        None => vec![
            Cell::new(&group.name),
            Cell::new(group.rows),
            Cell::new("routed").fg(Color::Green),
        ],
        Some(reason) => vec![
            Cell::new(&group.name),
            Cell::new("-").add_attribute(Attribute::Dim),
            Cell::new(format!("skipped: {reason}")).fg(Color::Yellow),
        ],
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
