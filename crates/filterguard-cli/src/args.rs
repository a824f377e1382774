//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use filterguard_core::EnforcerConfig;

/// Environment variable holding the compact policy string.
pub const REQUIRED_FILTERS_ENV: &str = "FILTERGUARD_REQUIRED_FILTERS";

/// Check query filters against required-filter policies.
#[derive(Parser, Debug)]
#[command(name = "filterguard")]
#[command(version, about = "Required-filter policy checker", long_about = None)]
pub struct Args {
    /// Required filters as `collection:field,...`.
    #[arg(long, env = REQUIRED_FILTERS_ENV)]
    pub required_filters: Option<String>,

    /// JSON policy file (`{"collection": ["field", ...]}`).
    #[arg(long)]
    pub policy_file: Option<PathBuf>,

    /// Maximum filter depth to search. 0 disables the limit.
    #[arg(long, default_value_t = 0)]
    pub max_depth: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a filter against the policy for a collection.
    Check {
        /// Target collection.
        #[arg(short, long)]
        collection: String,

        /// Filter as inline JSON.
        #[arg(short, long, conflicts_with = "filter_file")]
        filter: Option<String>,

        /// File containing the filter JSON. Reads stdin when neither this
        /// nor --filter is given.
        #[arg(long)]
        filter_file: Option<PathBuf>,
    },

    /// Print the loaded policies as JSON.
    Show,
}

impl Args {
    /// Enforcer configuration described by these arguments.
    pub fn to_config(&self) -> EnforcerConfig {
        EnforcerConfig {
            required_filters: self.required_filters.clone(),
            policy_file: self.policy_file.clone(),
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_args() {
        let args = Args::try_parse_from([
            "filterguard",
            "--required-filters",
            "orders:tenantId",
            "--max-depth",
            "16",
            "check",
            "--collection",
            "orders",
            "--filter",
            r#"{"tenantId": 1}"#,
        ])
        .unwrap();

        let config = args.to_config();
        assert_eq!(config.required_filters.as_deref(), Some("orders:tenantId"));
        assert_eq!(config.max_depth, Some(16));
        assert!(config.policy_file.is_none());

        match args.command {
            Command::Check {
                collection,
                filter,
                filter_file,
            } => {
                assert_eq!(collection, "orders");
                assert_eq!(filter.as_deref(), Some(r#"{"tenantId": 1}"#));
                assert!(filter_file.is_none());
            }
            Command::Show => panic!("expected check"),
        }
    }

    #[test]
    fn test_zero_depth_is_unbounded() {
        let args = Args::try_parse_from(["filterguard", "--policy-file", "p.json", "show"]).unwrap();
        let config = args.to_config();
        assert!(config.max_depth.is_none());
        assert_eq!(config.policy_file, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_filter_sources_conflict() {
        let result = Args::try_parse_from([
            "filterguard",
            "check",
            "-c",
            "orders",
            "--filter",
            "{}",
            "--filter-file",
            "f.json",
        ]);
        assert!(result.is_err());
    }
}
