use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use adimport_map::{ConfidenceLevel, MappingSuggestion};
use adimport_model::{CellValue, ValidationIssue, ValidationResult};

use crate::types::{CheckReport, ImportReport};

#[derive(Clone, Copy)]
enum Severity {
    Error,
    Warning,
}

pub fn print_check_summary(report: &CheckReport) {
    println!("Kind: {}", report.kind);
    println!("Source: {}", report.source.display());
    println!("Rows: {}", report.rows);
    print_mapping_table(report);
    print_issue_table(&report.validation);
    let summary = &report.validation.summary;
    println!();
    if report.validation.is_valid() {
        println!(
            "Valid: {} of {} rows ({} warnings)",
            summary.valid_rows, summary.total_rows, summary.warning_count
        );
    } else {
        println!(
            "Invalid: {} errors, {} warnings ({} of {} rows clean)",
            summary.error_count, summary.warning_count, summary.valid_rows, summary.total_rows
        );
    }
}

pub fn print_import_summary(report: &ImportReport) {
    print_check_summary(&report.check);
    println!();
    if report.gated {
        println!("Import blocked: fix the validation errors or pass --force.");
        return;
    }
    let Some(result) = &report.import else {
        println!("Dry run: nothing imported.");
        return;
    };
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Imported"),
        header_cell("Failed"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        count_cell(result.imported, Color::Green),
        count_cell(result.failed, Color::Red),
        count_cell(result.skipped, Color::Yellow),
    ]);
    println!("{table}");
    if !result.errors.is_empty() {
        eprintln!("Failed rows:");
        for error in &result.errors {
            eprintln!("- row {}: {}", error.row, error.message);
        }
    }
}

fn print_mapping_table(report: &CheckReport) {
    if report.suggestions.is_empty() && report.mapping.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source column"),
        header_cell("Target field"),
        header_cell("Score"),
        header_cell("Confidence"),
    ]);
    apply_mapping_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for suggestion in &report.suggestions.suggestions {
        add_mapping_row(&mut table, &suggestion.source_header, report);
    }
    for header in &report.suggestions.unmapped {
        add_mapping_row(&mut table, header, report);
    }
    println!();
    println!("Mapping:");
    println!("{table}");
    if !report.dropped_targets.is_empty() {
        eprintln!(
            "Dropped mapping targets (not in schema): {}",
            report.dropped_targets.join(", ")
        );
    }
}

fn add_mapping_row(table: &mut Table, header: &str, report: &CheckReport) {
    let target = report.mapping.target_for(header);
    let suggestion = suggestion_for(report, header)
        .filter(|candidate| Some(candidate.target_field.as_str()) == target);
    match (target, suggestion) {
        (Some(target), Some(suggestion)) => {
            table.add_row(vec![
                Cell::new(header),
                Cell::new(target),
                Cell::new(format!("{:.2}", suggestion.score)),
                confidence_cell(suggestion.confidence()),
            ]);
        }
        (Some(target), None) => {
            table.add_row(vec![
                Cell::new(header),
                Cell::new(target),
                dim_cell("-"),
                Cell::new("manual").fg(Color::Blue),
            ]);
        }
        (None, _) => {
            table.add_row(vec![
                Cell::new(header).fg(Color::Yellow),
                dim_cell("unmapped"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
        }
    }
}

fn suggestion_for<'a>(report: &'a CheckReport, header: &str) -> Option<&'a MappingSuggestion> {
    report
        .suggestions
        .suggestions
        .iter()
        .find(|candidate| candidate.source_header == header)
}

fn print_issue_table(validation: &ValidationResult) {
    let issues: Vec<(Severity, &ValidationIssue)> = validation
        .errors
        .iter()
        .map(|issue| (Severity::Error, issue))
        .chain(
            validation
                .warnings
                .iter()
                .map(|issue| (Severity::Warning, issue)),
        )
        .collect();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for (severity, issue) in issues {
        table.add_row(vec![
            severity_cell(severity),
            row_cell(issue),
            Cell::new(&issue.column),
            Cell::new(issue.kind.as_str()),
            value_cell(issue.value.as_ref()),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_mapping_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn row_cell(issue: &ValidationIssue) -> Cell {
    if issue.is_header_level() {
        dim_cell("header")
    } else {
        Cell::new(issue.row)
    }
}

fn value_cell(value: Option<&CellValue>) -> Cell {
    match value {
        Some(value) => Cell::new(value.to_string()),
        None => dim_cell("-"),
    }
}

fn confidence_cell(level: ConfidenceLevel) -> Cell {
    let cell = Cell::new(level.as_str());
    match level {
        ConfidenceLevel::High => cell.fg(Color::Green),
        ConfidenceLevel::Medium => cell.fg(Color::Yellow),
        ConfidenceLevel::Low => cell.fg(Color::DarkGrey),
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
