//! CSV and Markdown writers for the recommendation report, plus the
//! plain-text safety report.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use fieldtune_model::{DecisionCounts, SafetyReport};

use crate::error::ReportError;
use crate::rows::{REPORT_HEADERS, ReportRow};

/// Header metadata above the report table.
#[derive(Debug, Clone, Default)]
pub struct ReportMeta {
    pub collection: Option<String>,
    pub coverage_generated_at: Option<DateTime<Utc>>,
    pub counts: DecisionCounts,
    pub mean_coverage: Option<f64>,
}

/// Writes the report rows as CSV with the standard column set.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReportError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writer
        .write_record(REPORT_HEADERS)
        .map_err(|e| ReportError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    for row in rows {
        writer
            .write_record(row.cells())
            .map_err(|e| ReportError::Csv {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Renders the Markdown report: summary header plus the table.
pub fn render_markdown(meta: &ReportMeta, rows: &[ReportRow]) -> String {
    let mut out = String::new();
    out.push_str("# Field Recommendation Report\n\n");
    if let Some(collection) = &meta.collection {
        let _ = writeln!(out, "- Collection: `{collection}`");
    }
    if let Some(stamp) = meta.coverage_generated_at {
        let _ = writeln!(out, "- Coverage snapshot: {}", stamp.to_rfc3339());
    }
    let counts = meta.counts;
    let _ = writeln!(out, "- Fields analyzed: {}", counts.total);
    let _ = writeln!(
        out,
        "- DISABLE: {} | CONSIDER: {} | KEEP: {} | OPTIONAL: {}",
        counts.disable, counts.consider, counts.keep, counts.optional
    );
    if let Some(mean) = meta.mean_coverage {
        let _ = writeln!(out, "- Mean coverage: {mean:.1}%");
    }
    out.push('\n');

    let _ = writeln!(out, "| {} |", REPORT_HEADERS.join(" | "));
    let _ = writeln!(out, "|{}", " --- |".repeat(REPORT_HEADERS.len()));
    for row in rows {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| cell.replace('|', "\\|"))
            .collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    out
}

/// Writes the Markdown report to disk.
pub fn write_markdown(
    path: &Path,
    meta: &ReportMeta,
    rows: &[ReportRow],
) -> Result<(), ReportError> {
    std::fs::write(path, render_markdown(meta, rows)).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Plain-text rendering of a safety simulation, in the shape operators
/// see before confirming an apply.
pub fn render_safety_text(report: &SafetyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current included fields: {}", report.total_included);
    let _ = writeln!(out, "Candidate fields to disable: {}", report.candidate_count);
    let _ = writeln!(out, "Fields after disabling: {}", report.fields_after);
    if report.broken_expansions.is_empty() {
        out.push_str("\nNo expansion dependencies would be broken\n");
    } else {
        out.push_str("\nWARNING: these fields would break expansions if disabled:\n");
        for field in &report.broken_expansions {
            let _ = writeln!(out, "  - {field}");
        }
    }
    if !report.safe_to_disable.is_empty() {
        out.push_str("\nSafe to disable:\n");
        for field in &report.safe_to_disable {
            let _ = writeln!(out, "  - {field}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ReportRow {
        ReportRow {
            field_name: "client.age".to_string(),
            null_percentage: "62.50".to_string(),
            non_null_count: "375".to_string(),
            unique_values: "70".to_string(),
            category: "MEANINGFUL".to_string(),
            data_type: "number".to_string(),
            sample_values: "'41', '52'".to_string(),
            recommendation: "KEEP".to_string(),
            reason: "Moderate coverage (37.5% populated)".to_string(),
        }
    }

    #[test]
    fn markdown_contains_header_and_row() {
        let meta = ReportMeta {
            collection: Some("agentclients".to_string()),
            coverage_generated_at: None,
            counts: DecisionCounts {
                total: 1,
                disable: 0,
                consider: 0,
                keep: 1,
                optional: 0,
            },
            mean_coverage: Some(37.5),
        };
        let markdown = render_markdown(&meta, &[sample_row()]);
        assert!(markdown.starts_with("# Field Recommendation Report"));
        assert!(markdown.contains("- Collection: `agentclients`"));
        assert!(markdown.contains("- Mean coverage: 37.5%"));
        assert!(markdown.contains("| Field Name | Null % |"));
        assert!(markdown.contains("| client.age | 62.50 |"));
    }

    #[test]
    fn markdown_escapes_pipes_in_cells() {
        let mut row = sample_row();
        row.reason = "either|or".to_string();
        let markdown = render_markdown(&ReportMeta::default(), &[row]);
        assert!(markdown.contains("either\\|or"));
    }

    #[test]
    fn safety_text_lists_broken_expansions() {
        let report = SafetyReport {
            total_included: 10,
            candidate_count: 2,
            fields_after: 8,
            broken_expansions: vec!["client".to_string()],
            safe_to_disable: vec!["status".to_string()],
        };
        let text = render_safety_text(&report);
        assert!(text.contains("Current included fields: 10"));
        assert!(text.contains("WARNING"));
        assert!(text.contains("  - client"));
        assert!(text.contains("Safe to disable:"));
    }

    #[test]
    fn safety_text_clean_when_safe() {
        let report = SafetyReport {
            total_included: 5,
            candidate_count: 1,
            fields_after: 4,
            broken_expansions: Vec::new(),
            safe_to_disable: vec!["status".to_string()],
        };
        let text = render_safety_text(&report);
        assert!(text.contains("No expansion dependencies would be broken"));
    }
}
