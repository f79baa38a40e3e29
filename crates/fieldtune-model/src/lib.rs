pub mod coverage;
pub mod enums;
pub mod error;
pub mod field;
pub mod recommendation;
pub mod safety;
pub mod snapshot;

pub use coverage::{CoverageStats, MAX_SAMPLE_VALUES};
pub use enums::{DataType, Decision, FieldCategory, MatchKind, Priority};
pub use error::{ModelError, Result};
pub use field::{EXPANSION_MARKER, FieldDefinition};
pub use recommendation::{DecisionCounts, Recommendation};
pub use safety::{ChangeLog, SafetyReport};
pub use snapshot::ConfigurationSnapshot;
