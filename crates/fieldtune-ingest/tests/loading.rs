use std::fs;

use tempfile::tempdir;

use fieldtune_ingest::{CoverageError, CoverageReport};
use fieldtune_model::FieldCategory;

#[test]
fn loads_profiler_json_envelope() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("summary.json");
    fs::write(
        &path,
        r#"{
            "fieldSummaries": [
                {
                    "fieldName": "client.age",
                    "nullPercentage": 62.5,
                    "nonNullCount": 375,
                    "uniqueValues": 70,
                    "category": "MEANINGFUL",
                    "dataType": "number",
                    "sampleValues": ["41", "52"]
                }
            ]
        }"#,
    )
    .expect("write");

    let report = CoverageReport::load(&path).expect("load");
    assert_eq!(report.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.field_name, "client.age");
    assert_eq!(record.null_percentage, 62.5);
    assert_eq!(record.unique_values, 70);
    assert_eq!(record.category, FieldCategory::Meaningful);
}

#[test]
fn loads_bare_json_array() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("summary.json");
    fs::write(
        &path,
        r#"[{"fieldName": "status", "nullPercentage": 3.0}]"#,
    )
    .expect("write");

    let report = CoverageReport::load(&path).expect("load");
    assert_eq!(report.records[0].field_name, "status");
    assert_eq!(report.records[0].category, FieldCategory::Unknown);
}

#[test]
fn loads_csv_report() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("coverage.csv");
    fs::write(
        &path,
        "Field Name,Null %,Non-Null Count,Unique Values,Category,Data Type,Sample Values\n\
         client.gender,91.40,8600,2,MEANINGFUL,string,'M'; 'F'\n\
         client.name.prefix,99.20%,800,4,MEANINGFUL,string,\n",
    )
    .expect("write");

    let report = CoverageReport::load(&path).expect("load");
    assert_eq!(report.len(), 2);
    assert_eq!(report.records[0].field_name, "client.gender");
    assert_eq!(report.records[0].null_percentage, 91.40);
    assert_eq!(report.records[0].sample_values, vec!["M", "F"]);
    assert_eq!(report.records[1].null_percentage, 99.20);
    assert!(report.records[1].sample_values.is_empty());
}

#[test]
fn out_of_range_percentage_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("summary.json");
    fs::write(
        &path,
        r#"[{"fieldName": "bad", "nullPercentage": 140.0}]"#,
    )
    .expect("write");

    let err = CoverageReport::load(&path).unwrap_err();
    match err {
        CoverageError::Record { field, .. } => assert_eq!(field, "bad"),
        other => panic!("expected Record error, got {other}"),
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("coverage.xml");
    fs::write(&path, "<xml/>").expect("write");
    let err = CoverageReport::load(&path).unwrap_err();
    assert!(matches!(err, CoverageError::UnsupportedFormat { .. }));
}
