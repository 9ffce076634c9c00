use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{CalendarResult, ImportResult};

pub fn print_import_summary(result: &ImportResult) {
    let summary = &result.summary;
    println!("Source: {}", result.source.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: none (dry run)"),
    }
    println!("Profile: {}", result.profile_path.display());
    if let Some(fingerprint) = &result.fingerprint {
        println!("Profile fingerprint: {fingerprint}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attempted"),
        header_cell("Imported"),
        header_cell("Skipped"),
        header_cell("Failed"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.attempted).add_attribute(Attribute::Bold),
        count_cell(summary.imported, Color::Green),
        count_cell(summary.skipped, Color::Yellow),
        count_cell(summary.failed, Color::Red),
        count_cell(summary.conversion_warnings, Color::Yellow),
    ]);
    println!("{table}");

    if summary.aborted {
        eprintln!("Run aborted: no row imported before the failure budget ran out.");
    }
    let (shown, hidden) = summary.leading_errors(result.error_limit);
    if !shown.is_empty() {
        eprintln!("Errors:");
        for error in shown {
            eprintln!("- {error}");
        }
        if hidden > 0 {
            eprintln!("... and {hidden} more");
        }
    }
}

pub fn print_calendar_summary(result: &CalendarResult) {
    if let Some(path) = &result.output {
        println!("Calendar entries: {} written to {}", result.entries, path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
