use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use fieldtune_graph::IntegrityWarning;
use fieldtune_model::{ChangeLog, SafetyReport};
use fieldtune_recommend::RunSummary;
use fieldtune_report::{REPORT_HEADERS, ReportRow};

pub fn print_recommendations(rows: &[ReportRow], summary: &RunSummary) {
    println!("Fields analyzed: {}", summary.counts.total);
    println!(
        "DISABLE: {} | CONSIDER: {} | KEEP: {} | OPTIONAL: {}",
        summary.counts.disable,
        summary.counts.consider,
        summary.counts.keep,
        summary.counts.optional
    );
    if let Some(mean) = summary.mean_coverage {
        println!("Mean coverage: {mean:.1}%");
    }

    let mut table = Table::new();
    table.set_header(REPORT_HEADERS.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    apply_report_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.field_name),
            dim_when_empty(&row.null_percentage),
            dim_when_empty(&row.non_null_count),
            dim_when_empty(&row.unique_values),
            dim_when_empty(&row.category),
            dim_when_empty(&row.data_type),
            dim_when_empty(&row.sample_values),
            decision_cell(&row.recommendation),
            Cell::new(&row.reason),
        ]);
    }
    println!("{table}");
}

pub fn print_safety(report: &SafetyReport) {
    println!("Current included fields: {}", report.total_included);
    println!("Candidate fields to disable: {}", report.candidate_count);
    println!("Fields after disabling: {}", report.fields_after);

    if report.broken_expansions.is_empty() && report.safe_to_disable.is_empty() {
        println!("No candidate matched a currently included field.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Status")]);
    apply_list_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for field in &report.broken_expansions {
        table.add_row(vec![
            Cell::new(field),
            Cell::new("BREAKS EXPANSIONS")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    for field in &report.safe_to_disable {
        table.add_row(vec![
            Cell::new(field),
            Cell::new("SAFE").fg(Color::Green),
        ]);
    }
    println!("{table}");
}

pub fn print_change_log(log: &ChangeLog) {
    println!("Newly disabled fields: {}", log.disabled_now);
    println!("Already disabled: {}", log.already_disabled);
    if !log.not_found.is_empty() {
        println!("Candidates matching no field:");
        for candidate in &log.not_found {
            println!("  - {candidate}");
        }
    }
    if !log.overridden.is_empty() {
        println!("Overridden broken expansions (operator accepted):");
        for base in &log.overridden {
            println!("  - {base}");
        }
    }
}

pub fn print_warnings(warnings: &[IntegrityWarning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings:");
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    if table.column_count() >= 9 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(22)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Fixed(13)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(18)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
        ]);
    }
}

fn apply_list_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn decision_cell(decision: &str) -> Cell {
    match decision {
        "DISABLE" => Cell::new(decision)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        "CONSIDER" => Cell::new(decision).fg(Color::Yellow),
        "KEEP" => Cell::new(decision).fg(Color::Green),
        _ => Cell::new(decision).fg(Color::DarkGrey),
    }
}

fn dim_when_empty(value: &str) -> Cell {
    if value.is_empty() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}
