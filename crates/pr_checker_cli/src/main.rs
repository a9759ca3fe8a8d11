//! PR Checker command line tool.
//!
//! Settings are read from the environment (and a `.env` file) like the
//! service reads them. Logs go to standard error so that standard output only
//! carries the command result.

use clap::{Parser, Subcommand};
use pr_checker_cli::commands::{
    check_cmd::{self, CheckArgs},
    download_cmd,
    info_cmd::{self, InfoArgs},
    PullRequestArgs,
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// PR Checker CLI: Check pull requests against their Jira tickets
#[derive(Parser)]
#[command(name = "pr-checker")]
#[command(about = "Check pull requests against their Jira tickets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a pull request snapshot and publish the result
    Check(CheckArgs),

    /// Print a pull request snapshot as JSON
    Download(PullRequestArgs),

    /// Show the verdict for a pull request without publishing it
    Info(InfoArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Check(args) => check_cmd::execute(args).await,
        Commands::Download(args) => download_cmd::execute(args).await,
        Commands::Info(args) => info_cmd::execute(args).await,
    };

    if let Err(e) = result {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
