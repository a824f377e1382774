//! Required-filter enforcement.

use crate::config::EnforcerConfig;
use crate::error::{ConfigError, EnforcementError};
use crate::policy::RequiredFilterRegistry;
use crate::predicate::Predicate;
use crate::search::{contains_field, contains_field_within};

/// Checks query predicates against a collection's required filters.
///
/// Call [`check`](Self::check) on the query path before any remote fetch.
/// The enforcer never modifies the predicate and keeps no per-call state,
/// so one instance can serve any number of concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct FilterEnforcer {
    registry: RequiredFilterRegistry,
    max_depth: Option<usize>,
}

impl FilterEnforcer {
    /// Create an enforcer over a registry, searching predicates of any depth.
    pub fn new(registry: RequiredFilterRegistry) -> Self {
        Self {
            registry,
            max_depth: None,
        }
    }

    /// Build an enforcer from configuration.
    ///
    /// Fails if any policy source is malformed; nothing is partially loaded.
    pub fn from_config(config: &EnforcerConfig) -> Result<Self, ConfigError> {
        let registry = config.load_registry()?;
        Ok(Self {
            registry,
            max_depth: config.max_depth,
        })
    }

    /// Limit how deep predicates are searched.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// The policy registry.
    pub fn registry(&self) -> &RequiredFilterRegistry {
        &self.registry
    }

    /// Configured depth limit, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Verify that `filter` references every field required for `collection`.
    ///
    /// Collections without a policy always pass. Required fields are checked
    /// in configuration order and the first one missing is reported; absent
    /// entries are skipped.
    pub fn check(&self, collection: &str, filter: &Predicate) -> Result<(), EnforcementError> {
        let Some(required) = self.registry.required_fields(collection) else {
            return Ok(());
        };

        for field in required.iter().flatten() {
            if !self.contains(collection, filter, field)? {
                return Err(EnforcementError::RequiredFilterMissing {
                    collection: collection.to_string(),
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }

    fn contains(
        &self,
        collection: &str,
        filter: &Predicate,
        field: &str,
    ) -> Result<bool, EnforcementError> {
        match self.max_depth {
            None => Ok(contains_field(filter, field)),
            Some(max_depth) => contains_field_within(filter, field, max_depth).map_err(|e| {
                EnforcementError::TreeTooDeep {
                    collection: collection.to_string(),
                    max_depth: e.max_depth,
                }
            }),
        }
    }
}
