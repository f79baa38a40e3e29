//! Outputs of the disable-set simulation and of an applied change.

use serde::Serialize;

/// Result of simulating a candidate disable-set against a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    /// Fields currently included, before any change.
    pub total_included: usize,
    /// Candidate paths the operator proposed.
    pub candidate_count: usize,
    /// Included fields remaining after the disable-set would be applied.
    pub fields_after: usize,
    /// Base fields whose disabling would strand an active expansion.
    pub broken_expansions: Vec<String>,
    /// Matched fields that can be disabled without breaking anything.
    pub safe_to_disable: Vec<String>,
}

impl SafetyReport {
    /// True when nothing blocks applying the candidate set.
    pub fn is_safe(&self) -> bool {
        self.broken_expansions.is_empty()
    }
}

/// Accounting for one applied disable-set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLog {
    /// Fields flipped from included to excluded by this change.
    pub disabled_now: usize,
    /// Matched fields that were already excluded; the change is a no-op
    /// for them.
    pub already_disabled: usize,
    /// Candidate paths that matched no field in the snapshot.
    pub not_found: Vec<String>,
    /// Broken-expansion bases the operator explicitly accepted; empty on
    /// the default path.
    pub overridden: Vec<String>,
}

impl ChangeLog {
    pub fn is_noop(&self) -> bool {
        self.disabled_now == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_depends_only_on_broken_expansions() {
        let mut report = SafetyReport::default();
        assert!(report.is_safe());
        report.broken_expansions.push("client".to_string());
        assert!(!report.is_safe());
    }

    #[test]
    fn reports_serialize_with_camel_case_keys() {
        let report = SafetyReport {
            total_included: 3,
            candidate_count: 1,
            fields_after: 2,
            broken_expansions: Vec::new(),
            safe_to_disable: vec!["status".to_string()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalIncluded"], 3);
        assert_eq!(json["safeToDisable"][0], "status");
    }
}
