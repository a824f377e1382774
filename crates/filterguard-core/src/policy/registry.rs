//! Per-collection required-filter registry.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::parser::FIELD_SEPARATOR;
use crate::error::ConfigError;

type PolicyMap = BTreeMap<String, Vec<Option<String>>>;

/// Mapping from collection name to the fields its queries must filter on.
///
/// Built once and never mutated afterwards, so it can be shared across
/// threads freely. Reconfiguration builds a new registry.
///
/// A required field entry may be absent (`None`); such an entry is always
/// satisfied. Absent entries can only come from JSON policy documents
/// (`{"orders": ["tenantId", null]}`), never from the compact string form.
/// Empty or blank collection and field names are rejected in either form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyMap", into = "PolicyMap")]
pub struct RequiredFilterRegistry {
    filters: PolicyMap,
}

impl RequiredFilterRegistry {
    /// Create an empty registry that enforces nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON policy document of the form
    /// `{"collection": ["field", ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let filters: PolicyMap = serde_json::from_str(json)?;
        let registry = Self::try_from(filters)?;
        registry.log_loaded();
        Ok(registry)
    }

    /// Read and decode a JSON policy file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Required fields for a collection, in configuration order.
    ///
    /// Returns `None` when the collection has no policy.
    pub fn required_fields(&self, collection: &str) -> Option<&[Option<String>]> {
        self.filters.get(collection).map(Vec::as_slice)
    }

    /// Check whether a collection has a policy.
    pub fn has_policy(&self, collection: &str) -> bool {
        self.filters.contains_key(collection)
    }

    /// Collections with a policy, in name order.
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Number of collections with a policy.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if no collection has a policy.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub(crate) fn require(&mut self, collection: &str, field: &str) {
        self.filters
            .entry(collection.to_string())
            .or_default()
            .push(Some(field.to_string()));
    }

    /// Append another registry's fields after this one's, per collection.
    pub(crate) fn extend_from(&mut self, other: RequiredFilterRegistry) {
        for (collection, fields) in other.filters {
            self.filters.entry(collection).or_default().extend(fields);
        }
    }

    pub(crate) fn log_loaded(&self) {
        for (collection, fields) in &self.filters {
            tracing::debug!(
                collection = %collection,
                fields = ?fields,
                "loaded required filters"
            );
        }
        tracing::info!(collections = self.filters.len(), "required-filter registry built");
    }
}

impl TryFrom<PolicyMap> for RequiredFilterRegistry {
    type Error = ConfigError;

    fn try_from(filters: PolicyMap) -> Result<Self, Self::Error> {
        for (collection, fields) in &filters {
            if collection.trim().is_empty() {
                let entry = format!("{collection}{FIELD_SEPARATOR}");
                return Err(ConfigError::malformed(&entry, "empty collection name"));
            }
            if let Some(field) = fields.iter().flatten().find(|f| f.trim().is_empty()) {
                let entry = format!("{collection}{FIELD_SEPARATOR}{field}");
                return Err(ConfigError::malformed(&entry, "empty field name"));
            }
        }
        Ok(Self { filters })
    }
}

impl From<RequiredFilterRegistry> for PolicyMap {
    fn from(registry: RequiredFilterRegistry) -> Self {
        registry.filters
    }
}

impl<C, F> FromIterator<(C, F)> for RequiredFilterRegistry
where
    C: AsRef<str>,
    F: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (C, F)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (collection, field) in iter {
            registry.require(collection.as_ref(), field.as_ref());
        }
        registry
    }
}
