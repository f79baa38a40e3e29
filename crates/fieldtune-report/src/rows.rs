//! Tabular rows of the recommendation report.

use fieldtune_ingest::JoinedCoverage;
use fieldtune_model::{ConfigurationSnapshot, Recommendation};

/// Column headers of the recommendation report, in output order.
pub const REPORT_HEADERS: [&str; 9] = [
    "Field Name",
    "Null %",
    "Non-Null Count",
    "Unique Values",
    "Category",
    "Data Type",
    "Sample Values",
    "Recommendation",
    "Reason",
];

/// Number of sample values shown before eliding the rest.
const SAMPLE_DISPLAY_LIMIT: usize = 3;

/// One rendered report row; empty strings mark missing coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub field_name: String,
    pub null_percentage: String,
    pub non_null_count: String,
    pub unique_values: String,
    pub category: String,
    pub data_type: String,
    pub sample_values: String,
    pub recommendation: String,
    pub reason: String,
}

impl ReportRow {
    pub fn cells(&self) -> [&str; 9] {
        [
            &self.field_name,
            &self.null_percentage,
            &self.non_null_count,
            &self.unique_values,
            &self.category,
            &self.data_type,
            &self.sample_values,
            &self.recommendation,
            &self.reason,
        ]
    }
}

/// Builds report rows in recommendation order (the engine already sorted
/// them for output).
pub fn build_rows(
    snapshot: &ConfigurationSnapshot,
    coverage: &JoinedCoverage,
    recommendations: &[Recommendation],
) -> Vec<ReportRow> {
    recommendations
        .iter()
        .map(|rec| {
            let field = snapshot.get(&rec.field_path);
            let record = coverage.get(&rec.field_path);
            ReportRow {
                field_name: field
                    .map(|f| f.display_name().to_string())
                    .unwrap_or_else(|| rec.field_path.clone()),
                null_percentage: record
                    .map(|r| format!("{:.2}", r.null_percentage))
                    .unwrap_or_default(),
                non_null_count: record
                    .map(|r| r.non_null_count.to_string())
                    .unwrap_or_default(),
                unique_values: record
                    .map(|r| r.unique_values.to_string())
                    .unwrap_or_default(),
                category: record
                    .map(|r| r.category.to_string())
                    .or_else(|| field.map(|f| f.category.to_string()))
                    .unwrap_or_default(),
                data_type: field
                    .map(|f| f.data_type.to_string())
                    .or_else(|| {
                        record
                            .and_then(|r| r.data_type)
                            .map(|t| t.to_string())
                    })
                    .unwrap_or_default(),
                sample_values: record
                    .map(|r| format_samples(&r.sample_values))
                    .unwrap_or_default(),
                recommendation: rec.decision.to_string(),
                reason: rec.reason.clone(),
            }
        })
        .collect()
}

/// First few samples quoted, elided with `...` when more exist.
fn format_samples(samples: &[String]) -> String {
    if samples.is_empty() {
        return String::new();
    }
    let shown: Vec<String> = samples
        .iter()
        .take(SAMPLE_DISPLAY_LIMIT)
        .map(|s| format!("'{s}'"))
        .collect();
    // Semicolon-joined so a saved report parses back as coverage input.
    let mut formatted = shown.join("; ");
    if samples.len() > SAMPLE_DISPLAY_LIMIT {
        formatted.push_str("...");
    }
    formatted
}
