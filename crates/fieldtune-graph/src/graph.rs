//! Base-to-expansion dependency graph.
//!
//! Answers one question for the safety simulation: does disabling base
//! field X strand a currently-active expansion?

use std::collections::BTreeMap;

use fieldtune_model::ConfigurationSnapshot;

use crate::error::{GraphError, IntegrityWarning};

/// Active expansions registered under their base field path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    expansions: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Builds the graph from every included expansion in the snapshot.
    ///
    /// Fatal when an active expansion's base path is absent from the
    /// snapshot. A base without relationship metadata yields an
    /// [`IntegrityWarning::UnboundExpansion`] and the build proceeds.
    pub fn build(
        snapshot: &ConfigurationSnapshot,
    ) -> Result<(Self, Vec<IntegrityWarning>), GraphError> {
        let mut expansions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for field in snapshot.iter() {
            if !field.include {
                continue;
            }
            if let Some(base) = field.expansion_base() {
                expansions
                    .entry(base.to_string())
                    .or_default()
                    .push(field.field_path.clone());
            }
        }

        let mut warnings = Vec::new();
        for (base, paths) in &expansions {
            match snapshot.get(base) {
                None => {
                    return Err(GraphError::MissingBaseField {
                        base: base.clone(),
                        expansions: paths.clone(),
                    });
                }
                Some(field) if field.relationship_target.is_none() => {
                    warnings.push(IntegrityWarning::UnboundExpansion {
                        base: base.clone(),
                        expansions: paths.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok((Self { expansions }, warnings))
    }

    /// True iff at least one included expansion hangs off `base_path`.
    pub fn has_active_expansions(&self, base_path: &str) -> bool {
        self.expansions
            .get(base_path)
            .is_some_and(|paths| !paths.is_empty())
    }

    /// Active expansion paths registered under `base_path`.
    pub fn expansions_of(&self, base_path: &str) -> &[String] {
        self.expansions
            .get(base_path)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Base paths that currently back at least one active expansion.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.expansions.keys().map(String::as_str)
    }

    pub fn active_expansion_count(&self) -> usize {
        self.expansions.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtune_model::{DataType, FieldDefinition};

    fn reference(path: &str, target: Option<&str>, include: bool) -> FieldDefinition {
        let mut field = FieldDefinition::new(path, DataType::ObjectId);
        field.relationship_target = target.map(str::to_string);
        field.include = include;
        field
    }

    fn expansion(path: &str, include: bool) -> FieldDefinition {
        let mut field = FieldDefinition::new(path, DataType::String);
        field.include = include;
        field
    }

    #[test]
    fn registers_included_expansions_under_base() {
        let snapshot = ConfigurationSnapshot::from_fields(vec![
            reference("client", Some("people"), true),
            expansion("client_expanded.name.fullName", true),
            expansion("client_expanded.name.prefix", false),
        ])
        .unwrap();
        let (graph, warnings) = DependencyGraph::build(&snapshot).unwrap();
        assert!(warnings.is_empty());
        assert!(graph.has_active_expansions("client"));
        assert_eq!(
            graph.expansions_of("client"),
            ["client_expanded.name.fullName"]
        );
        assert_eq!(graph.active_expansion_count(), 1);
    }

    #[test]
    fn excluded_expansions_do_not_register() {
        let snapshot = ConfigurationSnapshot::from_fields(vec![
            reference("client", Some("people"), true),
            expansion("client_expanded.name.fullName", false),
        ])
        .unwrap();
        let (graph, _) = DependencyGraph::build(&snapshot).unwrap();
        assert!(!graph.has_active_expansions("client"));
    }

    #[test]
    fn missing_base_is_fatal() {
        let snapshot = ConfigurationSnapshot::from_fields(vec![expansion(
            "base_expanded.x",
            true,
        )])
        .unwrap();
        let err = DependencyGraph::build(&snapshot).unwrap_err();
        match err {
            GraphError::MissingBaseField { base, expansions } => {
                assert_eq!(base, "base");
                assert_eq!(expansions, vec!["base_expanded.x".to_string()]);
            }
        }
    }

    #[test]
    fn unbound_expansion_warns_but_builds() {
        let snapshot = ConfigurationSnapshot::from_fields(vec![
            reference("client", None, true),
            expansion("client_expanded.name.fullName", true),
        ])
        .unwrap();
        let (graph, warnings) = DependencyGraph::build(&snapshot).unwrap();
        assert!(graph.has_active_expansions("client"));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            IntegrityWarning::UnboundExpansion { base, .. } if base == "client"
        ));
    }

    #[test]
    fn base_excluded_from_export_is_still_a_valid_base() {
        // A base ObjectId may be excluded from output while its
        // expansions stay active; only its absence from the snapshot is
        // a defect.
        let snapshot = ConfigurationSnapshot::from_fields(vec![
            reference("client", Some("people"), false),
            expansion("client_expanded.name.fullName", true),
        ])
        .unwrap();
        let (graph, warnings) = DependencyGraph::build(&snapshot).unwrap();
        assert!(warnings.is_empty());
        assert!(graph.has_active_expansions("client"));
    }
}
