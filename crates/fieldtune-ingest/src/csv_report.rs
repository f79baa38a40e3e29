//! CSV layout of the coverage report.
//!
//! Headers match the recommendation-report column set so a previously
//! exported report can be fed back in: `Field Name, Null %, Non-Null
//! Count, Unique Values, Category, Data Type, Sample Values`. Sample
//! values are semicolon-joined.

use std::path::Path;
use std::str::FromStr;

use fieldtune_model::{DataType, FieldCategory};

use crate::error::CoverageError;
use crate::record::CoverageRecord;

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn csv_error(path: &Path, message: impl Into<String>) -> CoverageError {
    CoverageError::Csv {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

pub fn parse_coverage_csv(path: &Path) -> Result<Vec<CoverageRecord>, CoverageError> {
    let bytes = std::fs::read(path).map_err(|e| CoverageError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e.to_string()))?
        .clone();

    let idx_name = header_index(&headers, "Field Name");
    let idx_null = header_index(&headers, "Null %");
    let idx_non_null = header_index(&headers, "Non-Null Count");
    let idx_unique = header_index(&headers, "Unique Values");
    let idx_category = header_index(&headers, "Category");
    let idx_type = header_index(&headers, "Data Type");
    let idx_samples = header_index(&headers, "Sample Values");

    if idx_name.is_none() || idx_null.is_none() {
        return Err(csv_error(
            path,
            "missing required headers 'Field Name' and 'Null %'",
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e.to_string()))?;

        let field_name = get_string(&row, idx_name)
            .ok_or_else(|| csv_error(path, "missing Field Name value"))?;
        let null_raw = get_string(&row, idx_null)
            .ok_or_else(|| csv_error(path, format!("missing Null % for {field_name}")))?;
        let null_percentage = null_raw
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| {
                csv_error(path, format!("invalid Null % '{null_raw}' for {field_name}"))
            })?;

        let non_null_count = parse_count(&row, idx_non_null, path, &field_name)?;
        let unique_values = parse_count(&row, idx_unique, path, &field_name)?;
        let category = get_string(&row, idx_category)
            .map(|s| FieldCategory::from_str(&s))
            .transpose()
            .map_err(|message| csv_error(path, format!("{message} (field {field_name})")))?
            .unwrap_or_default();
        let data_type = get_string(&row, idx_type)
            .map(|s| DataType::from_str(&s))
            .transpose()
            .map_err(|message| csv_error(path, format!("{message} (field {field_name})")))?;
        let sample_values = get_string(&row, idx_samples)
            .map(|s| {
                s.split(';')
                    .map(|v| v.trim().trim_end_matches("...").trim_matches('\'').to_string())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        records.push(CoverageRecord {
            field_name,
            null_percentage,
            non_null_count,
            unique_values,
            category,
            data_type,
            sample_values,
            unobserved: false,
        });
    }
    Ok(records)
}

fn parse_count(
    row: &csv::StringRecord,
    idx: Option<usize>,
    path: &Path,
    field_name: &str,
) -> Result<u64, CoverageError> {
    match get_string(row, idx) {
        Some(raw) => raw
            .replace(',', "")
            .parse::<u64>()
            .map_err(|_| csv_error(path, format!("invalid count '{raw}' for {field_name}"))),
        None => Ok(0),
    }
}
