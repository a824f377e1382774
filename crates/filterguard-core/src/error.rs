//! Error types for policy loading and filter enforcement.

use thiserror::Error;

/// Stable numeric error codes surfaced to callers.
pub mod error_codes {
    /// Required-filter configuration could not be loaded.
    pub const INVALID_CONFIGURATION: u32 = 1;
    /// Query rejected by a required-filter policy.
    pub const QUERY_REJECTED: u32 = 2;
}

/// Errors raised while building a required-filter registry.
///
/// These are fatal to startup or reconfiguration: no registry is ever put
/// into service from a configuration that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An entry of the `collection:field` list did not split into exactly
    /// two non-empty tokens.
    #[error("malformed required-filter entry '{entry}': {reason}")]
    MalformedEntry {
        /// The offending entry, as written.
        entry: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A JSON policy document could not be decoded.
    #[error("invalid policy document: {0}")]
    InvalidPolicyDocument(#[from] serde_json::Error),

    /// A policy file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn malformed(entry: &str, reason: impl Into<String>) -> Self {
        ConfigError::MalformedEntry {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while checking a predicate against a collection's policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnforcementError {
    /// A required field does not appear anywhere in the predicate.
    #[error("Collection '{collection}' requires a filter on '{field}'!")]
    RequiredFilterMissing {
        /// Collection the query targeted.
        collection: String,
        /// The first required field that was not found.
        field: String,
    },

    /// The predicate nests deeper than the configured limit.
    #[error("filter for collection '{collection}' exceeds maximum depth of {max_depth}")]
    TreeTooDeep {
        /// Collection the query targeted.
        collection: String,
        /// Configured depth limit.
        max_depth: usize,
    },
}

impl EnforcementError {
    /// Numeric code for this rejection.
    pub fn code(&self) -> u32 {
        error_codes::QUERY_REJECTED
    }

    /// Collection the rejected query targeted.
    pub fn collection(&self) -> &str {
        match self {
            EnforcementError::RequiredFilterMissing { collection, .. }
            | EnforcementError::TreeTooDeep { collection, .. } => collection,
        }
    }
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Query rejected by policy.
    #[error(transparent)]
    Rejected(#[from] EnforcementError),
}

impl Error {
    /// Numeric code for this error.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => error_codes::INVALID_CONFIGURATION,
            Error::Rejected(err) => err.code(),
        }
    }

    /// Whether the error is a rejection of the caller's request rather
    /// than a system or configuration fault. User errors must not be retried.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Rejected(_))
    }
}
