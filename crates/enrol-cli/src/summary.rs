use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use enrol_model::{RecordError, RejectKind};
use enrol_pipeline::BatchReport;
use enrol_store::Table as RecordTable;

pub fn print_report(report: &BatchReport) {
    println!("Table: {}", report.table);
    println!("{}", counts_table(report));
    if let Some(table) = rejection_table(report) {
        println!();
        println!("Rejected records:");
        println!("{table}");
    }
    println!("{}", report.summary_line());
}

pub fn print_records(table: &RecordTable) {
    if table.is_empty() {
        println!("No records in {}", table.name());
        return;
    }
    println!();
    println!("{}", records_table(table));
}

/// One row of totals: processed, accepted, duplicates, other rejections.
pub fn counts_table(report: &BatchReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Processed"),
        header_cell("Accepted"),
        header_cell("Duplicates"),
        header_cell("Rejected"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(report.total).add_attribute(Attribute::Bold),
        count_cell(report.accepted, Color::Green),
        count_cell(report.duplicates, Color::Yellow),
        count_cell(report.rejected(), Color::Red),
    ]);
    table
}

/// Per-row rejection reasons, or `None` when every record was accepted.
pub fn rejection_table(report: &BatchReport) -> Option<Table> {
    let mut rejections = report.rejections().peekable();
    rejections.peek()?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Reason"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for (row, reason) in rejections {
        table.add_row(vec![
            Cell::new(row),
            reason_cell(reason),
            Cell::new(reason.to_string()),
        ]);
    }
    Some(table)
}

/// Stored records with their ids, one column per schema property.
pub fn records_table(records: &RecordTable) -> Table {
    let properties = records.schema().property_names();
    let mut table = Table::new();
    let mut header = vec![header_cell("ID")];
    header.extend(properties.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for stored in records.list_all() {
        let mut row = vec![Cell::new(stored.id()).fg(Color::DarkGrey)];
        row.extend(properties.iter().map(|name| match stored.get(name) {
            Some(value) if !value.is_missing() => Cell::new(value),
            _ => dim_cell("-"),
        }));
        table.add_row(row);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(11)),
            ColumnConstraint::UpperBoundary(Width::Percentage(80)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn reason_cell(reason: &RecordError) -> Cell {
    let kind = reason.kind();
    let color = match kind {
        RejectKind::Duplicate => Color::Yellow,
        RejectKind::Validation | RejectKind::AgeOutOfRange | RejectKind::InvalidEmail => {
            Color::Red
        }
    };
    Cell::new(kind.as_str().to_uppercase()).fg(color)
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
