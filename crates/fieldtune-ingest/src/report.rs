//! Loading and joining of whole coverage reports.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use fieldtune_model::ConfigurationSnapshot;

use crate::csv_report::parse_coverage_csv;
use crate::error::CoverageError;
use crate::record::CoverageRecord;

/// A point-in-time coverage report from the external profiler.
///
/// May be stale relative to the live corpus; no synchronization is
/// attempted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    pub records: Vec<CoverageRecord>,
}

/// Profiler JSON comes either as the summary envelope or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoverageJson {
    Envelope {
        #[serde(rename = "fieldSummaries")]
        field_summaries: Vec<CoverageRecord>,
    },
    Bare(Vec<CoverageRecord>),
}

impl CoverageReport {
    pub fn new(records: Vec<CoverageRecord>) -> Self {
        Self { records }
    }

    /// Loads a report, dispatching on the file extension.
    pub fn load(path: &Path) -> Result<Self, CoverageError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        let records = match extension.as_deref() {
            Some("json") => load_json(path)?,
            Some("csv") => parse_coverage_csv(path)?,
            _ => {
                return Err(CoverageError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        for record in &records {
            record
                .validate()
                .map_err(|message| CoverageError::Record {
                    path: path.to_path_buf(),
                    field: record.field_name.clone(),
                    message,
                })?;
        }
        debug!(path = %path.display(), records = records.len(), "loaded coverage report");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Coverage joined onto a snapshot, keyed by exact field path.
#[derive(Debug, Clone, Default)]
pub struct JoinedCoverage {
    records: BTreeMap<String, CoverageRecord>,
    /// Report entries whose field name matched no configured path.
    pub unmatched: Vec<String>,
}

impl JoinedCoverage {
    /// Joins an optional external report with the snapshot's embedded
    /// statistics. External records win over embedded statistics; the
    /// join key is the exact field path.
    pub fn build(snapshot: &ConfigurationSnapshot, report: Option<&CoverageReport>) -> Self {
        let mut records = BTreeMap::new();
        for field in snapshot.iter() {
            if let Some(record) = CoverageRecord::from_field(field) {
                records.insert(field.field_path.clone(), record);
            }
        }
        let mut unmatched = Vec::new();
        if let Some(report) = report {
            for record in &report.records {
                if snapshot.contains(&record.field_name) {
                    records.insert(record.field_name.clone(), record.clone());
                } else {
                    unmatched.push(record.field_name.clone());
                }
            }
        }
        Self { records, unmatched }
    }

    pub fn get(&self, field_path: &str) -> Option<&CoverageRecord> {
        self.records.get(field_path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn load_json(path: &Path) -> Result<Vec<CoverageRecord>, CoverageError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CoverageError::io(path, e))?;
    let parsed: CoverageJson =
        serde_json::from_str(&raw).map_err(|source| CoverageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match parsed {
        CoverageJson::Envelope { field_summaries } => field_summaries,
        CoverageJson::Bare(records) => records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtune_model::{CoverageStats, DataType, FieldDefinition};

    #[test]
    fn external_record_wins_over_embedded_statistics() {
        let mut field = FieldDefinition::new("status", DataType::String);
        field.statistics = Some(CoverageStats {
            total_occurrences: 10,
            null_count: 5,
            distinct_non_null_values: 2,
            sample_values: Vec::new(),
        });
        let snapshot = ConfigurationSnapshot::from_fields(vec![field]).unwrap();

        let report = CoverageReport::new(vec![CoverageRecord {
            field_name: "status".to_string(),
            null_percentage: 80.0,
            non_null_count: 2,
            unique_values: 2,
            category: fieldtune_model::FieldCategory::Meaningful,
            data_type: None,
            sample_values: Vec::new(),
            unobserved: false,
        }]);

        let joined = JoinedCoverage::build(&snapshot, Some(&report));
        assert_eq!(joined.get("status").unwrap().null_percentage, 80.0);
        assert!(joined.unmatched.is_empty());
    }

    #[test]
    fn unmatched_report_entries_are_returned() {
        let snapshot = ConfigurationSnapshot::from_fields(vec![FieldDefinition::new(
            "present",
            DataType::String,
        )])
        .unwrap();
        let report = CoverageReport::new(vec![CoverageRecord {
            field_name: "absent".to_string(),
            null_percentage: 10.0,
            non_null_count: 9,
            unique_values: 3,
            category: fieldtune_model::FieldCategory::Unknown,
            data_type: None,
            sample_values: Vec::new(),
            unobserved: false,
        }]);
        let joined = JoinedCoverage::build(&snapshot, Some(&report));
        assert!(joined.get("present").is_none());
        assert_eq!(joined.unmatched, vec!["absent".to_string()]);
    }
}
