//! Applies a validated disable-set, producing a new snapshot.

use std::collections::BTreeSet;

use tracing::info;

use fieldtune_model::{ChangeLog, ConfigurationSnapshot};

use crate::matching::match_against;

/// Disables every field matched by a candidate, returning the mutated
/// snapshot and an accounting of what changed.
///
/// The input snapshot is untouched; rollback is keeping the old value.
/// Idempotent on already-excluded fields: they count in
/// `already_disabled` and stay excluded. Callers must have simulated the
/// same candidate set first — the [`Session`](crate::Session) enforces
/// that ordering.
pub fn apply(
    snapshot: &ConfigurationSnapshot,
    candidates: &[String],
) -> (ConfigurationSnapshot, ChangeLog) {
    let mut next = snapshot.clone();
    let mut log = ChangeLog::default();
    let mut matched_candidates: BTreeSet<usize> = BTreeSet::new();

    for field in snapshot.iter() {
        let Some((candidate_index, _kind)) = match_against(&field.field_path, candidates) else {
            continue;
        };
        matched_candidates.insert(candidate_index);
        if field.include {
            next.set_include(&field.field_path, false);
            log.disabled_now += 1;
            info!(field = %field.field_path, "disabled field");
        } else {
            log.already_disabled += 1;
        }
    }

    for (index, candidate) in candidates.iter().enumerate() {
        if !matched_candidates.contains(&index) {
            log.not_found.push(candidate.clone());
        }
    }

    (next, log)
}
