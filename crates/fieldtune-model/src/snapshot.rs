//! Configuration snapshot: the full field set of one export configuration.

use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::field::FieldDefinition;

/// Ordered mapping of `fieldPath -> FieldDefinition`.
///
/// Loaded whole or not at all; iteration follows document order. A snapshot
/// is never mutated in place — the mutator produces a new snapshot so the
/// prior one stays valid for rollback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSnapshot {
    fields: Vec<FieldDefinition>,
    index: BTreeMap<String, usize>,
}

impl ConfigurationSnapshot {
    /// Builds a snapshot from document-ordered fields.
    ///
    /// Rejects duplicate paths and statistics that violate the count
    /// invariant; caps retained sample values.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Result<Self, ModelError> {
        let mut index = BTreeMap::new();
        let mut fields = fields;
        for (position, field) in fields.iter_mut().enumerate() {
            if let Some(stats) = field.statistics.as_mut() {
                stats.validate(&field.field_path)?;
                stats.truncate_samples();
            }
            if index.insert(field.field_path.clone(), position).is_some() {
                return Err(ModelError::DuplicateFieldPath {
                    path: field.field_path.clone(),
                });
            }
        }
        Ok(Self { fields, index })
    }

    pub fn get(&self, field_path: &str) -> Option<&FieldDefinition> {
        self.index.get(field_path).map(|&idx| &self.fields[idx])
    }

    pub fn contains(&self, field_path: &str) -> bool {
        self.index.contains_key(field_path)
    }

    /// Fields in document order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields currently included in export output.
    pub fn included_count(&self) -> usize {
        self.fields.iter().filter(|f| f.include).count()
    }

    /// Flips the include flag of one field. Returns false when the path is
    /// not present. Paths themselves are never rewritten, so the index
    /// stays valid.
    pub fn set_include(&mut self, field_path: &str, include: bool) -> bool {
        match self.index.get(field_path) {
            Some(&idx) => {
                self.fields[idx].include = include;
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a ConfigurationSnapshot {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
