//! Candidate-path matching against configured field paths.
//!
//! Three tiers, tried in order per candidate: exact equality, dotted
//! suffix, substring containment. All comparisons are case-insensitive.
//! The substring tier is intentionally permissive for operator
//! convenience and can over-match unrelated fields sharing a fragment;
//! callers log every substring hit so over-matches can be audited before
//! a persist.

use fieldtune_model::{ConfigurationSnapshot, FieldDefinition, MatchKind};
use tracing::warn;

/// Matches one candidate against one field path.
pub fn match_candidate(field_path: &str, candidate: &str) -> Option<MatchKind> {
    let field = field_path.to_lowercase();
    let cand = candidate.to_lowercase();
    if field == cand {
        return Some(MatchKind::Exact);
    }
    let mut suffix = String::with_capacity(cand.len() + 1);
    suffix.push('.');
    suffix.push_str(&cand);
    if field.ends_with(&suffix) {
        return Some(MatchKind::Suffix);
    }
    if field.contains(&cand) {
        return Some(MatchKind::Substring);
    }
    None
}

/// First candidate (in the given order) matching the field path, with
/// its match tier. Substring hits are logged.
pub fn match_against(field_path: &str, candidates: &[String]) -> Option<(usize, MatchKind)> {
    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(kind) = match_candidate(field_path, candidate) {
            if kind == MatchKind::Substring {
                warn!(
                    field = field_path,
                    candidate = candidate.as_str(),
                    "candidate matched by substring only; verify this is the intended field"
                );
            }
            return Some((index, kind));
        }
    }
    None
}

/// Resolves a candidate to the single best-matching field of the
/// snapshot: the first field (in document order) at the strongest tier
/// that matches anywhere. Substring resolutions are logged.
pub fn resolve_candidate<'a>(
    snapshot: &'a ConfigurationSnapshot,
    candidate: &str,
) -> Option<(&'a FieldDefinition, MatchKind)> {
    for kind in [MatchKind::Exact, MatchKind::Suffix, MatchKind::Substring] {
        for field in snapshot.iter() {
            if match_candidate(&field.field_path, candidate) == Some(kind) {
                if kind == MatchKind::Substring {
                    warn!(
                        candidate,
                        field = field.field_path.as_str(),
                        "candidate resolved by substring only; verify this is the intended field"
                    );
                }
                return Some((field, kind));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_case_insensitive() {
        assert_eq!(
            match_candidate("client.Name", "CLIENT.name"),
            Some(MatchKind::Exact)
        );
    }

    #[test]
    fn suffix_match_requires_dot_boundary() {
        assert_eq!(
            match_candidate("client.name.prefix", "prefix"),
            Some(MatchKind::Suffix)
        );
        // No leading-dot boundary: falls through to substring.
        assert_eq!(
            match_candidate("clientprefix", "prefix"),
            Some(MatchKind::Substring)
        );
    }

    #[test]
    fn substring_match_is_last_resort() {
        assert_eq!(
            match_candidate("realmData.ownerAgent_expanded._id", "ownerAgent"),
            Some(MatchKind::Substring)
        );
        assert_eq!(match_candidate("client.age", "income"), None);
    }

    #[test]
    fn first_matching_candidate_wins() {
        let candidates = vec!["nomatch".to_string(), "client".to_string()];
        let (index, kind) = match_against("client", &candidates).unwrap();
        assert_eq!(index, 1);
        assert_eq!(kind, MatchKind::Exact);
    }

    #[test]
    fn resolution_prefers_exact_over_broader_tiers() {
        use fieldtune_model::{DataType, FieldDefinition};
        // Both paths contain "client", but the exact match wins even
        // though the expansion comes first in document order.
        let snapshot = ConfigurationSnapshot::from_fields(vec![
            FieldDefinition::new("client_expanded.name.fullName", DataType::String),
            FieldDefinition::new("client", DataType::ObjectId),
        ])
        .unwrap();
        let (field, kind) = resolve_candidate(&snapshot, "client").unwrap();
        assert_eq!(field.field_path, "client");
        assert_eq!(kind, MatchKind::Exact);

        let (field, kind) = resolve_candidate(&snapshot, "fullName").unwrap();
        assert_eq!(field.field_path, "client_expanded.name.fullName");
        assert_eq!(kind, MatchKind::Suffix);

        assert!(resolve_candidate(&snapshot, "absent").is_none());
    }
}
