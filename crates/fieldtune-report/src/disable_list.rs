//! Disable-list files: one candidate path per line, `#` comments and
//! blank lines ignored.

use std::path::Path;

use crate::error::ReportError;

pub fn parse_disable_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_disable_list(path: &Path) -> Result<Vec<String>, ReportError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ReportError::DisableList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_disable_list(&raw))
}
