//! Per-field coverage records as emitted by the external profiler.

use serde::{Deserialize, Serialize};

use fieldtune_model::{CoverageStats, DataType, FieldCategory, FieldDefinition};

/// One field's coverage summary.
///
/// The profiler reports a finished percentage rather than raw counts, so
/// this is the shape classification consumes; embedded document statistics
/// are converted into it before the rules run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRecord {
    pub field_name: String,
    pub null_percentage: f64,
    #[serde(default)]
    pub non_null_count: u64,
    #[serde(default)]
    pub unique_values: u64,
    #[serde(default)]
    pub category: FieldCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
    /// Set when the profiler never observed the field; the derived
    /// percentage is 0 by convention but the field counts as fully empty.
    #[serde(skip)]
    pub unobserved: bool,
}

impl CoverageRecord {
    /// Converts a field's embedded statistics into a record, carrying the
    /// field's own category and data type.
    pub fn from_field(field: &FieldDefinition) -> Option<Self> {
        let stats = field.statistics.as_ref()?;
        Some(Self::from_stats(field, stats))
    }

    fn from_stats(field: &FieldDefinition, stats: &CoverageStats) -> Self {
        Self {
            field_name: field.field_path.clone(),
            null_percentage: stats.null_percentage(),
            non_null_count: stats.non_null_count(),
            unique_values: stats.distinct_non_null_values,
            category: field.category,
            data_type: Some(field.data_type),
            sample_values: stats.sample_values.clone(),
            unobserved: stats.is_unobserved(),
        }
    }

    /// Percentage of rows carrying a value.
    pub fn coverage_percentage(&self) -> f64 {
        100.0 - self.null_percentage
    }

    /// True when the field is empty for classification purposes: either
    /// effectively 100% null or never observed at all.
    pub fn is_fully_empty(&self) -> bool {
        self.unobserved || self.null_percentage >= 99.99
    }

    /// The single observed value, when the profiler saw exactly one.
    pub fn single_sample(&self) -> Option<&str> {
        if self.unique_values == 1 {
            self.sample_values.first().map(String::as_str)
        } else {
            None
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.null_percentage.is_finite() {
            return Err(format!(
                "nullPercentage is not a number: {}",
                self.null_percentage
            ));
        }
        if !(0.0..=100.0).contains(&self.null_percentage) {
            return Err(format!(
                "nullPercentage {} outside 0-100",
                self.null_percentage
            ));
        }
        Ok(())
    }
}
