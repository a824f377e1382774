//! Enforcer configuration.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::policy::{parse_required_filters, RequiredFilterRegistry};

/// Configuration for a [`FilterEnforcer`](crate::FilterEnforcer).
///
/// With neither a required-filters string nor a policy file, enforcement
/// is disabled. When both are given, the file's policies are loaded first
/// and the string's entries are appended to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnforcerConfig {
    /// Compact `collection:field,...` policy string.
    pub required_filters: Option<String>,

    /// Path to a JSON policy document.
    pub policy_file: Option<PathBuf>,

    /// Maximum predicate depth searched. None means unbounded.
    pub max_depth: Option<usize>,
}

impl EnforcerConfig {
    /// Create a configuration with enforcement disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compact policy string.
    pub fn with_required_filters(mut self, raw: impl Into<String>) -> Self {
        self.required_filters = Some(raw.into());
        self
    }

    /// Set the JSON policy file.
    pub fn with_policy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy_file = Some(path.into());
        self
    }

    /// Limit how deep predicates are searched.
    ///
    /// Recommended when predicates are built from untrusted input by means
    /// other than serde: an unbounded search recurses once per nesting
    /// level.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Search predicates of any depth.
    pub fn without_depth_limit(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Check if any policy source is configured.
    pub fn has_policies(&self) -> bool {
        self.required_filters.is_some() || self.policy_file.is_some()
    }

    /// Load the registry described by this configuration.
    pub fn load_registry(&self) -> Result<RequiredFilterRegistry, ConfigError> {
        let mut registry = match &self.policy_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading policy file");
                RequiredFilterRegistry::from_json_file(path)?
            }
            None => RequiredFilterRegistry::new(),
        };

        let inline = parse_required_filters(self.required_filters.as_deref())?;
        registry.extend_from(inline);
        Ok(registry)
    }
}
