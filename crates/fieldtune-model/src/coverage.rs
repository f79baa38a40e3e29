//! Per-field coverage statistics supplied by the external profiler.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Upper bound on retained sample values; the profiler's list is
/// representative, never exhaustive.
pub const MAX_SAMPLE_VALUES: usize = 20;

/// Aggregate counts for one field across the profiled corpus.
///
/// Immutable once loaded. `null_count <= total_occurrences` is enforced at
/// the load boundary via [`CoverageStats::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStats {
    pub total_occurrences: u64,
    pub null_count: u64,
    pub distinct_non_null_values: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
}

impl CoverageStats {
    /// Percentage of null occurrences, 0 when the field was never observed.
    ///
    /// An unobserved field still counts as fully empty for classification;
    /// callers check [`CoverageStats::is_unobserved`] alongside this value.
    pub fn null_percentage(&self) -> f64 {
        if self.total_occurrences == 0 {
            return 0.0;
        }
        self.null_count as f64 / self.total_occurrences as f64 * 100.0
    }

    /// Complement of [`CoverageStats::null_percentage`].
    pub fn coverage_percentage(&self) -> f64 {
        100.0 - self.null_percentage()
    }

    /// True when the profiler never saw this field at all.
    pub fn is_unobserved(&self) -> bool {
        self.total_occurrences == 0
    }

    pub fn non_null_count(&self) -> u64 {
        self.total_occurrences.saturating_sub(self.null_count)
    }

    /// The single observed value, when the field carries exactly one.
    pub fn single_sample(&self) -> Option<&str> {
        if self.distinct_non_null_values == 1 {
            self.sample_values.first().map(String::as_str)
        } else {
            None
        }
    }

    /// Checks the count invariant, naming the owning field on failure.
    pub fn validate(&self, field_path: &str) -> Result<(), ModelError> {
        if self.null_count > self.total_occurrences {
            return Err(ModelError::InvalidStatistics {
                path: field_path.to_string(),
                message: format!(
                    "nullCount {} exceeds totalOccurrences {}",
                    self.null_count, self.total_occurrences
                ),
            });
        }
        Ok(())
    }

    /// Drops sample values beyond the retained bound.
    pub fn truncate_samples(&mut self) {
        self.sample_values.truncate(MAX_SAMPLE_VALUES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u64, nulls: u64) -> CoverageStats {
        CoverageStats {
            total_occurrences: total,
            null_count: nulls,
            distinct_non_null_values: 0,
            sample_values: Vec::new(),
        }
    }

    #[test]
    fn null_percentage_basic() {
        assert_eq!(stats(100_000, 100_000).null_percentage(), 100.0);
        assert_eq!(stats(200, 100).null_percentage(), 50.0);
    }

    #[test]
    fn unobserved_field_reports_zero_but_flags() {
        let s = stats(0, 0);
        assert_eq!(s.null_percentage(), 0.0);
        assert!(s.is_unobserved());
    }

    #[test]
    fn validate_rejects_inverted_counts() {
        let err = stats(5, 6).validate("client.age").unwrap_err();
        assert!(err.to_string().contains("client.age"));
    }

    #[test]
    fn single_sample_requires_one_distinct_value() {
        let mut s = stats(10, 2);
        s.distinct_non_null_values = 1;
        s.sample_values = vec!["US".to_string()];
        assert_eq!(s.single_sample(), Some("US"));
        s.distinct_non_null_values = 2;
        assert_eq!(s.single_sample(), None);
    }

    #[test]
    fn truncate_caps_samples() {
        let mut s = stats(10, 0);
        s.sample_values = (0..40).map(|i| i.to_string()).collect();
        s.truncate_samples();
        assert_eq!(s.sample_values.len(), MAX_SAMPLE_VALUES);
    }
}
