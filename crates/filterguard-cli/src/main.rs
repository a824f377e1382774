//! filterguard command-line checker.
//!
//! Loads required-filter policies the same way a connector would and checks
//! a filter against them, for validating policy changes before rollout.

mod args;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use filterguard_core::FilterEnforcer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Args, Command};
use commands::CheckOutcome;

/// Exit code for a filter rejected by policy.
const EXIT_REJECTED: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filterguard=info,filterguard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.to_config();

    tracing::debug!(
        required_filters = ?config.required_filters,
        policy_file = ?config.policy_file,
        max_depth = ?config.max_depth,
        "configuration loaded"
    );

    let enforcer = FilterEnforcer::from_config(&config)?;

    match args.command {
        Command::Check {
            collection,
            filter,
            filter_file,
        } => {
            let filter =
                commands::read_filter(filter.as_deref(), filter_file.as_deref(), std::io::stdin())?;
            match commands::check(&enforcer, &collection, &filter) {
                CheckOutcome::Accepted => {
                    println!("accepted");
                    Ok(ExitCode::SUCCESS)
                }
                CheckOutcome::Rejected(err) => {
                    println!("rejected: {err}");
                    Ok(ExitCode::from(EXIT_REJECTED))
                }
            }
        }
        Command::Show => {
            println!("{}", commands::show(&enforcer)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
