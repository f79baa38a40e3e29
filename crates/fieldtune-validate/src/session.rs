//! One operator session over a configuration snapshot.
//!
//! The session is the explicit state machine between load and persist:
//!
//! ```text
//! Loaded -> IntegrityChecked -> Recommended -> Simulated -> Applied -> Persisted
//!                |                                 |
//!                +-> Rejected (fatal integrity)    +-> Rejected (unresolved breaks)
//! ```
//!
//! `Recommended` is advisory and never gates a transition; `Simulated`
//! is mandatory before `Applied`, for the exact candidate set being
//! applied. `Rejected` and `Persisted` are terminal.

use tracing::{info, warn};

use fieldtune_graph::{DependencyGraph, GraphError, IntegrityWarning};
use fieldtune_ingest::{CoverageReport, JoinedCoverage};
use fieldtune_model::{ChangeLog, ConfigurationSnapshot, Recommendation, SafetyReport};
use fieldtune_recommend::{EngineOptions, RecommendationEngine, RunSummary};
use fieldtune_store::{ConfigDocument, ConfigStore};

use crate::error::SessionError;
use crate::mutator;
use crate::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Loaded,
    IntegrityChecked,
    Recommended,
    Simulated,
    Applied,
    Persisted,
    Rejected,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Persisted | SessionState::Rejected)
    }
}

/// Whether the operator explicitly accepts breaking active expansions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptBroken {
    No,
    Yes,
}

pub struct Session {
    document: ConfigDocument,
    snapshot: ConfigurationSnapshot,
    coverage: JoinedCoverage,
    graph: Option<DependencyGraph>,
    warnings: Vec<IntegrityWarning>,
    state: SessionState,
    simulated: Option<(Vec<String>, SafetyReport)>,
}

impl Session {
    /// Opens a session over a loaded document, joining the optional
    /// external coverage report by exact field path.
    pub fn open(
        document: ConfigDocument,
        report: Option<&CoverageReport>,
    ) -> Result<Self, SessionError> {
        let snapshot = document.snapshot()?;
        let coverage = JoinedCoverage::build(&snapshot, report);
        for unmatched in &coverage.unmatched {
            warn!(field = unmatched.as_str(), "coverage entry matches no configured field");
        }
        let mut warnings = Vec::new();
        if document.included_index_drifted() {
            warnings.push(IntegrityWarning::IncludedIndexDrift);
        }
        info!(
            fields = snapshot.len(),
            included = snapshot.included_count(),
            "session loaded"
        );
        Ok(Self {
            document,
            snapshot,
            coverage,
            graph: None,
            warnings,
            state: SessionState::Loaded,
            simulated: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn snapshot(&self) -> &ConfigurationSnapshot {
        &self.snapshot
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn coverage(&self) -> &JoinedCoverage {
        &self.coverage
    }

    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    /// Builds the dependency graph and runs the integrity rules.
    ///
    /// Fatal defects (an expansion without its base) reject the session;
    /// warnings accumulate on [`Session::warnings`] and the session
    /// proceeds.
    pub fn check_integrity(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Loaded {
            return Err(self.invalid("check integrity"));
        }
        match DependencyGraph::build(&self.snapshot) {
            Ok((graph, warnings)) => {
                for warning in &warnings {
                    warn!(%warning, "integrity warning");
                }
                self.warnings.extend(warnings);
                self.graph = Some(graph);
                self.state = SessionState::IntegrityChecked;
                Ok(())
            }
            Err(error) => {
                self.state = SessionState::Rejected;
                Err(SessionError::Integrity(error))
            }
        }
    }

    /// Classifies every field. Advisory: the result never gates later
    /// transitions, and an operator may apply changes the engine did not
    /// suggest.
    pub fn recommend(
        &mut self,
        options: &EngineOptions,
    ) -> Result<(Vec<Recommendation>, RunSummary), SessionError> {
        if !matches!(
            self.state,
            SessionState::IntegrityChecked | SessionState::Recommended | SessionState::Simulated
        ) {
            return Err(self.invalid("recommend"));
        }
        let engine = RecommendationEngine::new(&self.snapshot, &self.coverage, options);
        let recommendations = engine.recommend_all();
        let summary = engine.summarize(&recommendations);
        if self.state == SessionState::IntegrityChecked {
            self.state = SessionState::Recommended;
        }
        Ok((recommendations, summary))
    }

    /// Simulates a candidate disable-set. Pure; records the candidate
    /// set so a later apply can be checked against it.
    pub fn simulate(&mut self, candidates: &[String]) -> Result<SafetyReport, SessionError> {
        let graph = match (&self.graph, self.state) {
            (
                Some(graph),
                SessionState::IntegrityChecked
                | SessionState::Recommended
                | SessionState::Simulated,
            ) => graph,
            _ => return Err(self.invalid("simulate")),
        };
        let report = validator::simulate(&self.snapshot, graph, candidates);
        info!(
            candidates = candidates.len(),
            broken = report.broken_expansions.len(),
            safe = report.safe_to_disable.len(),
            "simulated disable-set"
        );
        self.simulated = Some((candidates.to_vec(), report.clone()));
        self.state = SessionState::Simulated;
        Ok(report)
    }

    /// Applies the candidate set simulated last.
    ///
    /// Refuses when the set differs from the simulated one, and rejects
    /// the session on unresolved broken expansions unless the operator
    /// explicitly accepts the break — an acceptance that is recorded in
    /// the change log, never absorbed silently.
    pub fn apply(
        &mut self,
        candidates: &[String],
        accept_broken: AcceptBroken,
    ) -> Result<ChangeLog, SessionError> {
        if self.state != SessionState::Simulated {
            return Err(self.invalid("apply"));
        }
        let broken = match &self.simulated {
            Some((simulated_candidates, report)) if simulated_candidates == candidates => {
                report.broken_expansions.clone()
            }
            _ => return Err(SessionError::NotSimulated),
        };
        let mut overridden = Vec::new();
        if !broken.is_empty() {
            match accept_broken {
                AcceptBroken::No => {
                    self.state = SessionState::Rejected;
                    return Err(SessionError::SafetyViolation { broken });
                }
                AcceptBroken::Yes => {
                    overridden = broken;
                    for base in &overridden {
                        warn!(
                            base = base.as_str(),
                            "operator override: disabling base with active expansions"
                        );
                    }
                }
            }
        }

        let (next, mut log) = mutator::apply(&self.snapshot, candidates);
        log.overridden = overridden;
        self.document = self.document.clone().with_snapshot(&next);
        self.snapshot = next;
        self.state = SessionState::Applied;
        info!(
            disabled = log.disabled_now,
            already_disabled = log.already_disabled,
            "applied disable-set"
        );
        Ok(log)
    }

    /// Persists the mutated document atomically and closes the session.
    pub fn persist(&mut self, store: &ConfigStore) -> Result<(), SessionError> {
        if self.state != SessionState::Applied {
            return Err(self.invalid("persist"));
        }
        self.document.touch();
        store.persist(&self.document)?;
        self.state = SessionState::Persisted;
        info!(path = %store.path().display(), "configuration persisted");
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state,
        }
    }
}

/// Convenience for callers that only need the integrity verdict.
pub fn integrity_check(
    snapshot: &ConfigurationSnapshot,
) -> Result<Vec<IntegrityWarning>, GraphError> {
    DependencyGraph::build(snapshot).map(|(_, warnings)| warnings)
}
