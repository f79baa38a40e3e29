//! Recommendation engine: classifies every field of a snapshot.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use fieldtune_ingest::JoinedCoverage;
use fieldtune_model::{
    ConfigurationSnapshot, DecisionCounts, FieldDefinition, Recommendation,
};

use crate::rules::{RULES, RuleContext};
use crate::tokens::token_set;

/// Tuning knobs for one engine run.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Explicit technical-identifier paths, in addition to the derived
    /// set.
    pub technical_fields: Vec<String>,
    /// When set, reference fields (`objectId` + relationship target) are
    /// not auto-seeded into the technical-identifier set.
    pub no_derived_identifiers: bool,
}

/// Classifies fields via the ordered rule table.
///
/// Pure with respect to the snapshot: classification never touches
/// `include`, and the same inputs always produce the same output.
pub struct RecommendationEngine<'a> {
    snapshot: &'a ConfigurationSnapshot,
    coverage: &'a JoinedCoverage,
    technical: BTreeSet<String>,
    duplicates: BTreeMap<String, String>,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(
        snapshot: &'a ConfigurationSnapshot,
        coverage: &'a JoinedCoverage,
        options: &EngineOptions,
    ) -> Self {
        let mut technical: BTreeSet<String> = options
            .technical_fields
            .iter()
            .map(|p| p.to_lowercase())
            .collect();
        if !options.no_derived_identifiers {
            for field in snapshot.iter() {
                if field.is_expandable_reference() {
                    technical.insert(field.field_path.to_lowercase());
                }
            }
        }
        let duplicates = duplicate_hints(snapshot);
        Self {
            snapshot,
            coverage,
            technical,
            duplicates,
        }
    }

    /// Classifies one field. Total: every field receives exactly one
    /// decision, the first matching rule wins.
    pub fn classify(&self, field: &FieldDefinition) -> Recommendation {
        let mut tokens = token_set(&field.field_path);
        tokens.extend(token_set(field.display_name()));
        let ctx = RuleContext {
            field,
            coverage: self.coverage.get(&field.field_path),
            tokens: &tokens,
            is_technical: self.technical.contains(&field.field_path.to_lowercase()),
            duplicate_of: self.duplicates.get(&field.field_path).map(String::as_str),
        };
        for rule in RULES {
            if let Some(outcome) = (rule.apply)(&ctx) {
                debug!(
                    field = %field.field_path,
                    rule = rule.name,
                    decision = %outcome.decision,
                    "classified field"
                );
                return Recommendation::new(
                    field.field_path.clone(),
                    outcome.decision,
                    outcome.priority,
                    outcome.reason,
                );
            }
        }
        // The band rule matches unconditionally; this restates its
        // default outcome for the compiler's benefit.
        Recommendation::new(
            field.field_path.clone(),
            fieldtune_model::Decision::Consider,
            fieldtune_model::Priority::Low,
            "Evaluate based on business requirements",
        )
    }

    /// Classifies the whole snapshot, sorted for reporting: DISABLE
    /// first, then by priority, then by null percentage ascending.
    pub fn recommend_all(&self) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> =
            self.snapshot.iter().map(|f| self.classify(f)).collect();
        recommendations.sort_by(|a, b| {
            a.decision
                .sort_order()
                .cmp(&b.decision.sort_order())
                .then(a.priority.sort_order().cmp(&b.priority.sort_order()))
                .then_with(|| {
                    self.null_sort_key(&a.field_path)
                        .total_cmp(&self.null_sort_key(&b.field_path))
                })
        });
        recommendations
    }

    /// Decision tallies plus mean coverage over the classified fields.
    pub fn summarize(&self, recommendations: &[Recommendation]) -> RunSummary {
        RunSummary {
            counts: DecisionCounts::tally(recommendations),
            mean_coverage: mean_coverage(
                self.coverage,
                recommendations.iter().map(|r| r.field_path.as_str()),
            ),
        }
    }

    fn null_sort_key(&self, field_path: &str) -> f64 {
        self.coverage
            .get(field_path)
            .map(|c| c.null_percentage)
            .unwrap_or(f64::INFINITY)
    }
}

/// Summary line for one recommendation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub counts: DecisionCounts,
    /// Arithmetic mean of `100 - null%` over fields with coverage.
    pub mean_coverage: Option<f64>,
}

/// Arithmetic mean of coverage percentage over the given paths; `None`
/// when no path has coverage.
pub fn mean_coverage<'a>(
    coverage: &JoinedCoverage,
    paths: impl Iterator<Item = &'a str>,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for path in paths {
        if let Some(record) = coverage.get(path) {
            sum += record.coverage_percentage();
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Single-segment fields whose name reappears as the terminal segment of
/// a longer, included expansion path are presumed replicated there.
fn duplicate_hints(snapshot: &ConfigurationSnapshot) -> BTreeMap<String, String> {
    let mut hints = BTreeMap::new();
    for field in snapshot.iter() {
        if field.field_path.contains('.') || field.is_expansion() {
            continue;
        }
        let shallow = field.field_path.to_lowercase();
        for other in snapshot.iter() {
            if !other.include || !other.is_expansion() {
                continue;
            }
            let terminal = other
                .field_path
                .rsplit('.')
                .next()
                .unwrap_or(&other.field_path);
            if terminal.to_lowercase() == shallow
                && other.field_path.len() > field.field_path.len()
            {
                hints.insert(field.field_path.clone(), other.field_path.clone());
                break;
            }
        }
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtune_ingest::{CoverageRecord, CoverageReport};
    use fieldtune_model::{CoverageStats, DataType, Decision, FieldCategory, Priority};

    fn field_with_stats(path: &str, total: u64, nulls: u64, distinct: u64) -> FieldDefinition {
        let mut field = FieldDefinition::new(path, DataType::String);
        field.statistics = Some(CoverageStats {
            total_occurrences: total,
            null_count: nulls,
            distinct_non_null_values: distinct,
            sample_values: Vec::new(),
        });
        field
    }

    fn engine_fixture(
        fields: Vec<FieldDefinition>,
    ) -> (ConfigurationSnapshot, JoinedCoverage) {
        let snapshot = ConfigurationSnapshot::from_fields(fields).unwrap();
        let coverage = JoinedCoverage::build(&snapshot, None);
        (snapshot, coverage)
    }

    #[test]
    fn completely_empty_field_disables() {
        let (snapshot, coverage) =
            engine_fixture(vec![field_with_stats("x", 100_000, 100_000, 0)]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("x").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert_eq!(rec.priority, Priority::High);
        assert!(rec.reason.contains("Completely empty"));
    }

    #[test]
    fn single_value_reason_quotes_sample() {
        let mut field = field_with_stats("country", 100, 0, 1);
        field.category = FieldCategory::SingleValue;
        field.statistics.as_mut().unwrap().sample_values = vec!["US".to_string()];
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("country").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert!(rec.reason.contains("'US'"));
    }

    #[test]
    fn first_match_wins_over_demographic_rule() {
        // Fully empty AND demographic: rule 1 must decide, not rule 6.
        let field = field_with_stats("client.householdIncome", 1000, 1000, 0);
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("client.householdIncome").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert!(rec.reason.contains("Completely empty"));
    }

    #[test]
    fn derived_reference_identifiers_are_technical() {
        let mut client = FieldDefinition::new("client", DataType::ObjectId);
        client.relationship_target = Some("people".to_string());
        client.statistics = Some(CoverageStats {
            total_occurrences: 100,
            null_count: 0,
            distinct_non_null_values: 90,
            sample_values: Vec::new(),
        });
        let (snapshot, coverage) = engine_fixture(vec![client]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("client").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert!(rec.reason.contains("Technical identifier"));
    }

    #[test]
    fn explicit_technical_fields_match_case_insensitively() {
        let field = field_with_stats("legacyRef", 100, 10, 50);
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let options = EngineOptions {
            technical_fields: vec!["LEGACYREF".to_string()],
            no_derived_identifiers: false,
        };
        let engine = RecommendationEngine::new(&snapshot, &coverage, &options);
        let rec = engine.classify(snapshot.get("legacyRef").unwrap());
        assert!(rec.reason.contains("Technical identifier"));
    }

    #[test]
    fn sparse_name_field_kept_below_99() {
        let field = field_with_stats("client.name.prefix", 1000, 985, 40);
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("client.name.prefix").unwrap());
        assert_eq!(rec.decision, Decision::Keep);
        assert!(rec.reason.contains("potentially valuable"));
    }

    #[test]
    fn sparse_non_keyword_field_disables_above_98() {
        let field = field_with_stats("client.uploadFile", 1000, 985, 40);
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("client.uploadFile").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert!(rec.reason.contains("Too sparse"));
    }

    #[test]
    fn demographic_bands_disable_then_consider() {
        let disable = field_with_stats("client.educationLevel", 1000, 920, 12);
        let consider = field_with_stats("client.gender", 1000, 850, 12);
        let keep = field_with_stats("client.age", 1000, 300, 60);
        let (snapshot, coverage) = engine_fixture(vec![disable, consider, keep]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());

        let rec = engine.classify(snapshot.get("client.educationLevel").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert!(rec.reason.contains("Demographic"));

        let rec = engine.classify(snapshot.get("client.gender").unwrap());
        assert_eq!(rec.decision, Decision::Consider);

        let rec = engine.classify(snapshot.get("client.age").unwrap());
        assert_eq!(rec.decision, Decision::Keep);
        assert!(rec.reason.contains("Good coverage"));
    }

    #[test]
    fn interest_fields_disable_above_85() {
        let field = field_with_stats("client.golfInterest", 1000, 900, 2);
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("client.golfInterest").unwrap());
        assert_eq!(rec.decision, Decision::Disable);
        assert!(rec.reason.contains("Interest"));
    }

    #[test]
    fn duplicate_name_heuristic_considers() {
        let mut base = FieldDefinition::new("client", DataType::ObjectId);
        base.relationship_target = Some("people".to_string());
        let shallow = field_with_stats("fullName", 1000, 5, 900);
        let deep = field_with_stats("client_expanded.name.fullName", 1000, 5, 900);
        let (snapshot, coverage) = engine_fixture(vec![base, shallow, deep]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("fullName").unwrap());
        assert_eq!(rec.decision, Decision::Consider);
        assert!(
            rec.reason
                .contains("Possible duplicate of 'client_expanded.name.fullName'")
        );
    }

    #[test]
    fn field_without_statistics_still_classifies() {
        let field = FieldDefinition::new("mystery", DataType::String);
        let (snapshot, coverage) = engine_fixture(vec![field]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("mystery").unwrap());
        assert_eq!(rec.decision, Decision::Consider);
        assert!(rec.reason.contains("No coverage statistics"));
    }

    #[test]
    fn recommend_all_sorts_disable_first_then_null_ascending() {
        let (snapshot, coverage) = engine_fixture(vec![
            field_with_stats("good", 1000, 100, 50),
            field_with_stats("emptyB", 1000, 1000, 0),
            field_with_stats("sparse", 1000, 999, 40),
            field_with_stats("emptyA", 500, 500, 0),
        ]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let recs = engine.recommend_all();
        let order: Vec<&str> = recs.iter().map(|r| r.field_path.as_str()).collect();
        // High-priority empties first (tied at 100% null, document order),
        // then the medium-priority sparse disable, then the keep.
        assert_eq!(order, vec!["emptyB", "emptyA", "sparse", "good"]);
    }

    #[test]
    fn summary_mean_coverage_matches_hand_computation() {
        let (snapshot, coverage) = engine_fixture(vec![
            field_with_stats("a", 100, 40, 5),
            field_with_stats("b", 100, 20, 5),
        ]);
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let recs = engine.recommend_all();
        let summary = engine.summarize(&recs);
        assert_eq!(summary.counts.total, 2);
        assert_eq!(summary.mean_coverage, Some((60.0 + 80.0) / 2.0));
    }

    #[test]
    fn external_report_overrides_embedded_statistics() {
        let field = field_with_stats("status", 100, 10, 5);
        let snapshot = ConfigurationSnapshot::from_fields(vec![field]).unwrap();
        let report = CoverageReport::new(vec![CoverageRecord {
            field_name: "status".to_string(),
            null_percentage: 100.0,
            non_null_count: 0,
            unique_values: 0,
            category: FieldCategory::Empty,
            data_type: None,
            sample_values: Vec::new(),
            unobserved: false,
        }]);
        let coverage = JoinedCoverage::build(&snapshot, Some(&report));
        let engine = RecommendationEngine::new(&snapshot, &coverage, &EngineOptions::default());
        let rec = engine.classify(snapshot.get("status").unwrap());
        assert!(rec.reason.contains("Completely empty"));
    }
}
