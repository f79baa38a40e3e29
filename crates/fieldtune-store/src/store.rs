//! Load/persist boundary with a write-temp-then-rename transactional
//! guarantee: the prior document stays valid and readable until the new
//! one is fully written.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::document::ConfigDocument;
use crate::error::StoreError;

/// Handle on one configuration document on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the document. Fatal on malformed input; a
    /// drifted `includedFields` index is surfaced as a warning only.
    pub fn load(&self) -> Result<ConfigDocument, StoreError> {
        load_document(&self.path)
    }

    /// Writes the document atomically, regenerating the derived
    /// `includedFields` index. A failed write leaves the prior file
    /// untouched.
    pub fn persist(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        persist_document(&self.path, document)
    }
}

pub fn load_document(path: &Path) -> Result<ConfigDocument, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let document: ConfigDocument =
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    // Surfaces duplicate paths and count-invariant violations before the
    // session reaches LOADED.
    document.snapshot().map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    if document.included_index_drifted() {
        warn!(
            path = %path.display(),
            "includedFields index is out of sync with the fields section; \
             it will be regenerated on the next persist"
        );
    }
    Ok(document)
}

pub fn persist_document(path: &Path, document: &ConfigDocument) -> Result<(), StoreError> {
    let mut document = document.clone();
    document.sync_included_index();

    let mut payload =
        serde_json::to_string_pretty(&document).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    payload.push('\n');

    let tmp = temp_path(path);
    if let Err(source) = fs::write(&tmp, payload) {
        return Err(StoreError::write(&tmp, source));
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::write(path, source));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
