//! On-disk layout of the field-configuration document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldtune_model::{ConfigurationSnapshot, FieldDefinition, ModelError};

/// The persisted configuration document.
///
/// `included_fields` is a derived index of the paths with `include == true`.
/// Earlier tooling let operators edit it independently of `fields`, which
/// drifted; it is now regenerated on every persist and only checked on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Source collection this field set was discovered from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_fields: Option<Vec<String>>,
}

impl ConfigDocument {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self {
            collection: None,
            generated_at: None,
            fields,
            included_fields: None,
        }
    }

    /// Validates and indexes the field list into a snapshot.
    pub fn snapshot(&self) -> Result<ConfigurationSnapshot, ModelError> {
        ConfigurationSnapshot::from_fields(self.fields.clone())
    }

    /// Replaces the field set with a mutated snapshot, keeping the
    /// document header.
    pub fn with_snapshot(mut self, snapshot: &ConfigurationSnapshot) -> Self {
        self.fields = snapshot.fields().to_vec();
        self
    }

    /// Paths with `include == true`, in document order.
    pub fn included_paths(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.include)
            .map(|f| f.field_path.clone())
            .collect()
    }

    /// Rebuilds the derived `includedFields` index from the field list.
    pub fn sync_included_index(&mut self) {
        self.included_fields = Some(self.included_paths());
    }

    /// True when the stored index no longer matches the field list.
    pub fn included_index_drifted(&self) -> bool {
        match &self.included_fields {
            Some(index) => *index != self.included_paths(),
            None => false,
        }
    }

    /// Stamps the document as regenerated now.
    pub fn touch(&mut self) {
        self.generated_at = Some(Utc::now());
    }
}
