//! Disable-set simulation: a pure dry run against the dependency graph.

use std::collections::BTreeSet;

use fieldtune_graph::DependencyGraph;
use fieldtune_model::{ConfigurationSnapshot, SafetyReport};

use crate::matching::resolve_candidate;

/// Simulates disabling `candidates` without mutating anything.
///
/// Each candidate resolves to its single best-matching field. A resolved,
/// currently-included reference field with active expansions lands in
/// `broken_expansions`: disabling it would strand those expansions. Every
/// other resolved included field is safe. Fields already excluded count
/// neither way — there is nothing left to break or to disable.
///
/// Note the asymmetry with [`apply`](crate::mutator::apply), which sweeps
/// every field matching any candidate: a substring candidate can disable
/// more fields than the simulation flags. Both paths log substring hits
/// so the operator can audit before persisting.
pub fn simulate(
    snapshot: &ConfigurationSnapshot,
    graph: &DependencyGraph,
    candidates: &[String],
) -> SafetyReport {
    let mut report = SafetyReport {
        total_included: snapshot.included_count(),
        candidate_count: candidates.len(),
        ..SafetyReport::default()
    };

    let mut resolved: BTreeSet<String> = BTreeSet::new();
    let mut disabled_included = 0usize;
    for candidate in candidates {
        let Some((field, _kind)) = resolve_candidate(snapshot, candidate) else {
            continue;
        };
        if !resolved.insert(field.field_path.clone()) {
            continue;
        }
        if !field.include {
            continue;
        }
        disabled_included += 1;
        if field.is_expandable_reference() && graph.has_active_expansions(&field.field_path) {
            report.broken_expansions.push(field.field_path.clone());
        } else {
            report.safe_to_disable.push(field.field_path.clone());
        }
    }
    report.fields_after = report.total_included - disabled_included;
    report
}
