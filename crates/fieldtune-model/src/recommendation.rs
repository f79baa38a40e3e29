//! Ephemeral classification output, recomputed each run and never persisted.

use serde::Serialize;

use crate::enums::{Decision, Priority};

/// The classification of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub field_path: String,
    pub decision: Decision,
    pub priority: Priority,
    pub reason: String,
}

impl Recommendation {
    pub fn new(
        field_path: impl Into<String>,
        decision: Decision,
        priority: Priority,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            decision,
            priority,
            reason: reason.into(),
        }
    }
}

/// Decision counts over one recommendation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionCounts {
    pub total: usize,
    pub disable: usize,
    pub consider: usize,
    pub keep: usize,
    pub optional: usize,
}

impl DecisionCounts {
    pub fn tally<'a>(recommendations: impl IntoIterator<Item = &'a Recommendation>) -> Self {
        let mut counts = Self::default();
        for rec in recommendations {
            counts.total += 1;
            match rec.decision {
                Decision::Disable => counts.disable += 1,
                Decision::Consider => counts.consider += 1,
                Decision::Keep => counts.keep += 1,
                Decision::Optional => counts.optional += 1,
            }
        }
        counts
    }

    /// Fields remaining if every DISABLE recommendation were accepted.
    pub fn retained(&self) -> usize {
        self.total - self.disable
    }
}
