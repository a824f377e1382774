//! Subcommand implementations.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use filterguard_core::{EnforcementError, FilterEnforcer, Predicate};

/// Outcome of a `check` run.
#[derive(Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The filter satisfies the collection's policy.
    Accepted,
    /// The filter was rejected.
    Rejected(EnforcementError),
}

/// Decode a filter from inline JSON, a file, or `stdin`, in that order.
pub fn read_filter(
    inline: Option<&str>,
    file: Option<&Path>,
    mut stdin: impl Read,
) -> anyhow::Result<Predicate> {
    let source = match (inline, file) {
        (Some(json), _) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read filter file {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read filter from stdin")?;
            buf
        }
    };

    serde_json::from_str(&source).context("filter is not valid JSON")
}

/// Check a filter against the policy for a collection.
pub fn check(enforcer: &FilterEnforcer, collection: &str, filter: &Predicate) -> CheckOutcome {
    match enforcer.check(collection, filter) {
        Ok(()) => {
            tracing::debug!(collection, "filter accepted");
            CheckOutcome::Accepted
        }
        Err(err) => {
            tracing::info!(collection, code = err.code(), error = %err, "filter rejected");
            CheckOutcome::Rejected(err)
        }
    }
}

/// Render the loaded policies.
pub fn show(enforcer: &FilterEnforcer) -> anyhow::Result<String> {
    serde_json::to_string_pretty(enforcer.registry()).context("failed to encode policies")
}
