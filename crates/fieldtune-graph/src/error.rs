use serde::Serialize;
use thiserror::Error;

/// Fatal configuration-integrity defects; the session rejects on these.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(
        "no base field '{base}' exists for active expansion(s): {}",
        expansions.join(", ")
    )]
    MissingBaseField {
        base: String,
        expansions: Vec<String>,
    },
}

/// Non-fatal integrity findings, surfaced to the operator without
/// blocking the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IntegrityWarning {
    /// Base field exists but declares no relationship target; its
    /// expansions lack a declared source yet may predate the metadata.
    #[serde(rename_all = "camelCase")]
    UnboundExpansion {
        base: String,
        expansions: Vec<String>,
    },
    /// The document's derived includedFields index disagrees with the
    /// field list.
    #[serde(rename_all = "camelCase")]
    IncludedIndexDrift,
}

impl std::fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityWarning::UnboundExpansion { base, expansions } => write!(
                f,
                "base field '{base}' has no relationshipTarget for expansion(s): {}",
                expansions.join(", ")
            ),
            IntegrityWarning::IncludedIndexDrift => {
                write!(f, "includedFields index is out of sync with the fields section")
            }
        }
    }
}
