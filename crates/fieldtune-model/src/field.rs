//! One configured field of the export extract.

use serde::{Deserialize, Serialize};

use crate::coverage::CoverageStats;
use crate::enums::{DataType, FieldCategory};

/// Marker segment that separates an expansion path from its base field.
///
/// `client_expanded.name.fullName` is an expansion of the base field
/// `client`; the base must be an `objectId` reference into another
/// collection for the expansion to resolve.
pub const EXPANSION_MARKER: &str = "_expanded";

/// A single field definition from the configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Dot-delimited hierarchical path; unique within a snapshot.
    pub field_path: String,
    /// Operator-facing label shown in reports when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub data_type: DataType,
    /// Whether the field currently appears in export output.
    #[serde(default = "default_include")]
    pub include: bool,
    /// Referenced entity collection; present only for expandable
    /// `objectId` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_target: Option<String>,
    #[serde(default)]
    pub category: FieldCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<CoverageStats>,
}

fn default_include() -> bool {
    true
}

impl FieldDefinition {
    pub fn new(field_path: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field_path: field_path.into(),
            business_name: None,
            data_type,
            include: true,
            relationship_target: None,
            category: FieldCategory::Unknown,
            statistics: None,
        }
    }

    /// True when this field is an `objectId` reference with a declared
    /// target collection, i.e. the kind of field expansions hang off.
    pub fn is_expandable_reference(&self) -> bool {
        self.data_type.is_reference() && self.relationship_target.is_some()
    }

    /// True when the path carries the expansion marker.
    pub fn is_expansion(&self) -> bool {
        self.field_path.contains(EXPANSION_MARKER)
    }

    /// Base path of an expansion: the text before the first marker.
    /// `None` for non-expansion paths.
    pub fn expansion_base(&self) -> Option<&str> {
        self.field_path
            .find(EXPANSION_MARKER)
            .map(|idx| &self.field_path[..idx])
    }

    /// Label used in reports: the business name when present, otherwise
    /// the raw path.
    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or(&self.field_path)
    }
}
