//! The ordered classification rule table.
//!
//! Evaluation is first-match-wins: the first rule returning an outcome
//! decides the field, later rules are never consulted. The order itself is
//! load-bearing — a fully-empty demographic field must classify as empty
//! (rule 1), not demographic (rule 6) — so the table is data, not control
//! flow, and the ordering is testable in isolation.

use std::collections::BTreeSet;

use fieldtune_ingest::CoverageRecord;
use fieldtune_model::{Decision, FieldCategory, FieldDefinition, Priority};

use crate::tokens::{contains_any, contains_phrase};

/// Keywords marking a field as address/demographic/name data, which gets
/// a higher sparsity tolerance before disabling (rule 5).
const SPARSE_VALUE_KEYWORDS: &[&str] = &["address", "name", "demographic", "demographics"];

/// Whole-token demographic markers (rule 6); `net worth` matches as a
/// token pair.
const DEMOGRAPHIC_KEYWORDS: &[&str] = &["income", "education", "age", "gender", "household"];

const INTEREST_KEYWORDS: &[&str] = &["interest"];

/// Everything a rule predicate may look at for one field.
pub struct RuleContext<'a> {
    pub field: &'a FieldDefinition,
    pub coverage: Option<&'a CoverageRecord>,
    pub tokens: &'a BTreeSet<String>,
    /// Field path is in the technical-identifier set.
    pub is_technical: bool,
    /// Path of a more specific field presumed to replicate this one.
    pub duplicate_of: Option<&'a str>,
}

impl RuleContext<'_> {
    fn category(&self) -> FieldCategory {
        self.coverage
            .map(|c| c.category)
            .unwrap_or(self.field.category)
    }

    fn null_percentage(&self) -> Option<f64> {
        self.coverage.map(|c| c.null_percentage)
    }

    fn unique_values(&self) -> Option<u64> {
        self.coverage.map(|c| c.unique_values)
    }
}

pub struct Outcome {
    pub decision: Decision,
    pub priority: Priority,
    pub reason: String,
}

impl Outcome {
    fn new(decision: Decision, priority: Priority, reason: impl Into<String>) -> Self {
        Self {
            decision,
            priority,
            reason: reason.into(),
        }
    }
}

pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&RuleContext) -> Option<Outcome>,
}

/// The rule table, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "completely-empty",
        apply: completely_empty,
    },
    Rule {
        name: "single-value",
        apply: single_value,
    },
    Rule {
        name: "technical-identifier",
        apply: technical_identifier,
    },
    Rule {
        name: "sparse-low-variation",
        apply: sparse_low_variation,
    },
    Rule {
        name: "extremely-sparse",
        apply: extremely_sparse,
    },
    Rule {
        name: "sparse-demographic",
        apply: sparse_demographic,
    },
    Rule {
        name: "sparse-interest",
        apply: sparse_interest,
    },
    Rule {
        name: "duplicate-name",
        apply: duplicate_name,
    },
    Rule {
        name: "coverage-band",
        apply: coverage_band,
    },
];

/// Rule 1: effectively 100% null, or never observed by the profiler.
fn completely_empty(ctx: &RuleContext) -> Option<Outcome> {
    let coverage = ctx.coverage?;
    if coverage.is_fully_empty() {
        return Some(Outcome::new(
            Decision::Disable,
            Priority::High,
            "Completely empty (100% null)",
        ));
    }
    None
}

/// Rule 2: a field with one observed value carries no information.
fn single_value(ctx: &RuleContext) -> Option<Outcome> {
    let single_distinct = ctx.unique_values() == Some(1);
    if ctx.category() != FieldCategory::SingleValue && !single_distinct {
        return None;
    }
    let reason = match ctx.coverage.and_then(|c| c.sample_values.first()) {
        Some(sample) => format!("Single value only: '{sample}'"),
        None => "Single value - no variation".to_string(),
    };
    Some(Outcome::new(Decision::Disable, Priority::High, reason))
}

/// Rule 3: reference/linkage identifiers are not business data.
fn technical_identifier(ctx: &RuleContext) -> Option<Outcome> {
    if ctx.is_technical {
        return Some(Outcome::new(
            Decision::Disable,
            Priority::High,
            "Technical identifier field - not business data",
        ));
    }
    None
}

/// Rule 4: extremely sparse with almost no variation.
fn sparse_low_variation(ctx: &RuleContext) -> Option<Outcome> {
    let null_pct = ctx.null_percentage()?;
    let unique = ctx.unique_values()?;
    if null_pct > 95.0 && unique < 10 {
        return Some(Outcome::new(
            Decision::Disable,
            Priority::Medium,
            format!("Extremely sparse ({null_pct:.1}% null) with only {unique} unique values"),
        ));
    }
    None
}

/// Rule 5: above 98% null. Address/demographic/name fields get one more
/// point of tolerance before disabling; everything else goes.
fn extremely_sparse(ctx: &RuleContext) -> Option<Outcome> {
    let null_pct = ctx.null_percentage()?;
    if null_pct <= 98.0 {
        return None;
    }
    if contains_any(ctx.tokens, SPARSE_VALUE_KEYWORDS) || is_demographic(ctx) {
        if null_pct > 99.0 {
            return Some(Outcome::new(
                Decision::Disable,
                Priority::Medium,
                format!("Address/demographic field too sparse ({null_pct:.1}% null)"),
            ));
        }
        return Some(Outcome::new(
            Decision::Keep,
            Priority::Low,
            format!(
                "Address/demographic data - sparse but potentially valuable ({null_pct:.1}% null)"
            ),
        ));
    }
    Some(Outcome::new(
        Decision::Disable,
        Priority::Medium,
        format!("Too sparse to be useful ({null_pct:.1}% null)"),
    ))
}

/// Rule 6: demographic fields tolerate sparsity only so far.
fn sparse_demographic(ctx: &RuleContext) -> Option<Outcome> {
    if !is_demographic(ctx) {
        return None;
    }
    let null_pct = ctx.null_percentage()?;
    if null_pct > 90.0 {
        return Some(Outcome::new(
            Decision::Disable,
            Priority::Medium,
            format!("Demographic field too sparse ({null_pct:.1}% null)"),
        ));
    }
    if null_pct > 80.0 {
        return Some(Outcome::new(
            Decision::Consider,
            Priority::Medium,
            format!("Demographic field is sparse ({null_pct:.1}% null) - evaluate business value"),
        ));
    }
    None
}

/// Rule 7: interest-category markers.
fn sparse_interest(ctx: &RuleContext) -> Option<Outcome> {
    if !contains_any(ctx.tokens, INTEREST_KEYWORDS) {
        return None;
    }
    let null_pct = ctx.null_percentage()?;
    if null_pct > 85.0 {
        return Some(Outcome::new(
            Decision::Disable,
            Priority::Medium,
            format!("Interest field too sparse ({null_pct:.1}% null)"),
        ));
    }
    None
}

/// Rule 8: name heuristic only — a more specific field elsewhere appears
/// to replicate this one. Never an automatic disable.
fn duplicate_name(ctx: &RuleContext) -> Option<Outcome> {
    let duplicate = ctx.duplicate_of?;
    Some(Outcome::new(
        Decision::Consider,
        Priority::Low,
        format!("Possible duplicate of '{duplicate}'"),
    ))
}

/// Rule 9: fallback coverage bands. Always produces an outcome, so every
/// field is classified.
fn coverage_band(ctx: &RuleContext) -> Option<Outcome> {
    let Some(null_pct) = ctx.null_percentage() else {
        return Some(Outcome::new(
            Decision::Consider,
            Priority::Low,
            "No coverage statistics - evaluate based on business requirements",
        ));
    };
    let populated = 100.0 - null_pct;
    let outcome = if null_pct < 50.0 {
        Outcome::new(
            Decision::Keep,
            Priority::Low,
            format!("Good coverage ({populated:.1}% populated)"),
        )
    } else if null_pct < 75.0 {
        Outcome::new(
            Decision::Keep,
            Priority::Low,
            format!("Moderate coverage ({populated:.1}% populated)"),
        )
    } else if null_pct < 85.0 {
        Outcome::new(
            Decision::Consider,
            Priority::Low,
            format!("Limited coverage ({populated:.1}% populated) - evaluate business need"),
        )
    } else {
        Outcome::new(
            Decision::Consider,
            Priority::Low,
            format!("Evaluate based on business requirements ({null_pct:.1}% null)"),
        )
    };
    Some(outcome)
}

fn is_demographic(ctx: &RuleContext) -> bool {
    contains_any(ctx.tokens, DEMOGRAPHIC_KEYWORDS) || contains_phrase(ctx.tokens, &["net", "worth"])
}
