use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use flights_model::{CheckKind, IssueSeverity, ValidationIssue};
use flights_store::TableSample;

use flights_cli::types::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    match &summary.db_path {
        Some(path) => println!("Database: {} (table {})", path.display(), summary.table),
        None => println!("Dry run: table {} not written", summary.table),
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Read"), Cell::new(summary.rows_read)]);
    table.add_row(vec![
        Cell::new("After key filter"),
        Cell::new(summary.rows_sanitized),
    ]);
    table.add_row(vec![
        Cell::new("Written").add_attribute(Attribute::Bold),
        match summary.rows_written {
            Some(rows) => Cell::new(rows).add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Validation errors"),
        count_cell(summary.validation.error_count(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Validation warnings"),
        count_cell(summary.validation.warning_count(), Color::Yellow),
    ]);
    println!("{table}");

    print_issue_table(&summary.validation.issues);
    if let Some(sample) = &summary.sample {
        print_sample(sample);
    }
}

fn print_issue_table(issues: &[ValidationIssue]) {
    let mut findings: Vec<&ValidationIssue> = issues
        .iter()
        .filter(|issue| issue.severity != IssueSeverity::Info)
        .collect();
    if findings.is_empty() {
        return;
    }
    findings.sort_by_key(|issue| std::cmp::Reverse(severity_rank(issue.severity)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Check"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in findings {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(check_label(issue.check)),
            Cell::new(issue.column.as_deref().unwrap_or("-")),
            match issue.count {
                Some(count) => Cell::new(count).fg(severity_color(issue.severity)),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_sample(sample: &TableSample) {
    if sample.columns.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(sample.columns.iter().map(|name| header_cell(name)));
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for row in &sample.rows {
        table.add_row(row.iter().map(|value| {
            if value == "NULL" {
                dim_cell(value)
            } else {
                Cell::new(value)
            }
        }));
    }
    println!();
    println!("Sample ({} rows):", sample.rows.len());
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn check_label(check: CheckKind) -> &'static str {
    match check {
        CheckKind::NullTolerance => "nulls",
        CheckKind::KeyDuplicates => "keys",
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
        IssueSeverity::Info => dim_cell("INFO"),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
        IssueSeverity::Info => 0,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
        IssueSeverity::Info => Color::DarkGrey,
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
