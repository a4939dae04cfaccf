use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use benef_core::GroupView;
use benef_model::{ResultSummary, Side};
use benef_cli::commands::side_label;
use benef_cli::types::{InspectReport, ValidateReport};

pub fn print_validate_report(report: &ValidateReport) {
    println!(
        "{}: {}",
        side_label(Side::Sheet),
        report.sheet_status.user_message()
    );
    println!(
        "{}: {}",
        side_label(Side::Csv),
        report.csv_status.user_message()
    );
    for group in &report.groups {
        print_group(group);
    }
    print_summary(&report.summary);
    for path in &report.exports {
        println!("Exported: {}", path.display());
    }
}

fn print_group(group: &GroupView) {
    println!();
    println!(
        "{} ({} registro(s)) [{}]",
        group.verdict, group.record_count, group.counter
    );
    let mut table = Table::new();
    table.set_header(group.columns.iter().map(|label| header_cell(label)));
    apply_table_style(&mut table);
    for row in &group.rows {
        table.add_row(row.cells.iter().map(|value| {
            if row.highlighted {
                Cell::new(value).fg(Color::Red)
            } else {
                Cell::new(value)
            }
        }));
    }
    println!("{table}");
}

fn print_summary(summary: &ResultSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parecer"), header_cell("Registros")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for group in &summary.groups {
        let verdict = if group.technical_decline {
            Cell::new(&group.verdict)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&group.verdict)
        };
        table.add_row(vec![verdict, Cell::new(group.records)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total_matches).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        dim_cell("CPFs do CSV sem parecer"),
        count_cell(summary.unmatched_csv_records, Color::Yellow),
    ]);
    println!();
    println!("{table}");
}

pub fn print_inspect_report(report: &InspectReport) {
    println!("File: {}", report.path.display());
    println!("Separator: {}", report.separator);
    println!("Data rows: {}", report.data_rows);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Index"), header_cell("Header")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    let resolved_index = report
        .column
        .as_ref()
        .and_then(|column| column.resolved)
        .map(|found| found.index);
    for (index, label) in report.header.iter().enumerate() {
        let label_cell = if Some(index) == resolved_index {
            Cell::new(label)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else if label.trim().is_empty() {
            dim_cell("(blank)")
        } else {
            Cell::new(label)
        };
        table.add_row(vec![Cell::new(index), label_cell]);
    }
    println!("{table}");

    if let Some(column) = &report.column {
        match (&column.resolved, &column.suggestion) {
            (Some(found), _) => println!(
                "Column \"{}\" resolved to index {} ({} match)",
                column.name, found.index, found.rule
            ),
            (None, Some(suggestion)) => println!(
                "Column \"{}\" not found. Did you mean \"{suggestion}\"?",
                column.name
            ),
            (None, None) => println!("Column \"{}\" not found", column.name),
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
