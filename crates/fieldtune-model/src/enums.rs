//! Type-safe enumerations for the field-configuration document.
//!
//! The original export tooling kept these as loose strings inside untyped
//! key/value records; here every tag is fixed at compile time so a missing
//! or misspelled key surfaces as a parse error instead of a runtime surprise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data type of a configured field, as written in the document's `dataType` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Datetime,
    ObjectId,
    Object,
    Array,
}

impl DataType {
    /// Returns the tag as it appears in the configuration document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Datetime => "datetime",
            DataType::ObjectId => "objectId",
            DataType::Object => "object",
            DataType::Array => "array",
        }
    }

    /// Returns true for identifier fields that may carry a relationship
    /// reference into another collection.
    pub fn is_reference(&self) -> bool {
        matches!(self, DataType::ObjectId)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "number" => Ok(DataType::Number),
            "boolean" => Ok(DataType::Boolean),
            "datetime" | "date" => Ok(DataType::Datetime),
            "objectid" => Ok(DataType::ObjectId),
            "object" => Ok(DataType::Object),
            "array" => Ok(DataType::Array),
            _ => Err(format!("Unknown data type: {s}")),
        }
    }
}

/// Coverage category assigned by the external profiler.
///
/// Input metadata only; the recommendation rules consume it but never
/// derive or rewrite it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldCategory {
    SingleValue,
    Meaningful,
    Empty,
    #[default]
    Unknown,
}

impl FieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::SingleValue => "SINGLE_VALUE",
            FieldCategory::Meaningful => "MEANINGFUL",
            FieldCategory::Empty => "EMPTY",
            FieldCategory::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SINGLE_VALUE" => Ok(FieldCategory::SingleValue),
            "MEANINGFUL" => Ok(FieldCategory::Meaningful),
            "EMPTY" => Ok(FieldCategory::Empty),
            "UNKNOWN" | "" => Ok(FieldCategory::Unknown),
            _ => Err(format!("Unknown field category: {s}")),
        }
    }
}

/// Outcome of classifying one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Keep,
    Disable,
    Consider,
    Optional,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "KEEP",
            Decision::Disable => "DISABLE",
            Decision::Consider => "CONSIDER",
            Decision::Optional => "OPTIONAL",
        }
    }

    /// Report sort rank: DISABLE first, then CONSIDER, then KEEP/OPTIONAL.
    pub fn sort_order(&self) -> u8 {
        match self {
            Decision::Disable => 0,
            Decision::Consider => 1,
            Decision::Keep | Decision::Optional => 2,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KEEP" => Ok(Decision::Keep),
            "DISABLE" => Ok(Decision::Disable),
            "CONSIDER" => Ok(Decision::Consider),
            "OPTIONAL" => Ok(Decision::Optional),
            _ => Err(format!("Unknown decision: {s}")),
        }
    }
}

/// Urgency attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Report sort rank: HIGH before MEDIUM before LOW.
    pub fn sort_order(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a candidate path matched a configured field.
///
/// The tiers are tried in order; `Substring` is deliberately permissive
/// and can over-match unrelated fields sharing a fragment, so callers log
/// whenever it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Case-insensitive path equality.
    Exact,
    /// Field path ends with `"." + candidate`.
    Suffix,
    /// Candidate appears anywhere in the field path.
    Substring,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Suffix => "suffix",
            MatchKind::Substring => "substring",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
