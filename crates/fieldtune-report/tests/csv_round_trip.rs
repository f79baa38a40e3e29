use tempfile::tempdir;

use fieldtune_ingest::{CoverageReport, JoinedCoverage};
use fieldtune_model::{
    ConfigurationSnapshot, CoverageStats, DataType, Decision, FieldDefinition, Priority,
    Recommendation,
};
use fieldtune_report::{build_rows, write_csv};

/// A saved recommendation CSV parses back as a coverage report, so a
/// prior run can seed the next one.
#[test]
fn saved_report_feeds_back_as_coverage() {
    let mut field = FieldDefinition::new("client.gender", DataType::String);
    field.category = fieldtune_model::FieldCategory::Meaningful;
    field.statistics = Some(CoverageStats {
        total_occurrences: 10_000,
        null_count: 9_140,
        distinct_non_null_values: 2,
        sample_values: vec!["M".to_string(), "F".to_string()],
    });
    let snapshot = ConfigurationSnapshot::from_fields(vec![field]).unwrap();
    let coverage = JoinedCoverage::build(&snapshot, None);
    let recommendations = vec![Recommendation::new(
        "client.gender",
        Decision::Disable,
        Priority::Medium,
        "Demographic field too sparse (91.4% null)",
    )];
    let rows = build_rows(&snapshot, &coverage, &recommendations);

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("recommendations.csv");
    write_csv(&path, &rows).expect("write csv");

    let reloaded = CoverageReport::load(&path).expect("reload as coverage");
    assert_eq!(reloaded.len(), 1);
    let record = &reloaded.records[0];
    assert_eq!(record.field_name, "client.gender");
    assert_eq!(record.null_percentage, 91.40);
    assert_eq!(record.unique_values, 2);
    assert_eq!(record.sample_values, vec!["M", "F"]);
}
