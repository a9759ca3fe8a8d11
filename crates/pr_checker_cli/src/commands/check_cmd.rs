//! Check a pull request snapshot.
//!
//! The snapshot is the pull request JSON as GitHub returns it, for example the
//! output of `pr-checker download`.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use github_client::models::PullRequest;
use pr_checker_core::{PublishOutcome, PullRequestChecker, Verdict};
use tracing::{info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "check_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Read the snapshot from this file instead of standard input
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Evaluate only, do not publish statuses
    #[arg(long)]
    pub dry_run: bool,
}

/// Parses a pull request snapshot.
pub fn read_pull_request<R: Read>(mut reader: R) -> Result<PullRequest, Error> {
    let mut input = String::new();
    reader.read_to_string(&mut input).map_err(Error::ReadInput)?;
    serde_json::from_str(&input).map_err(Error::InvalidSnapshot)
}

/// Evaluates the snapshot and publishes the verdict unless `dry_run` is set.
///
/// Returns the verdict and, when published, the publish outcome.
#[instrument(skip(checker, pull_request), fields(pull_number = pull_request.number))]
pub async fn check(
    checker: &PullRequestChecker,
    pull_request: &PullRequest,
    dry_run: bool,
) -> Result<(Verdict, Option<PublishOutcome>), Error> {
    let verdict = checker.evaluate(pull_request).await?;
    if dry_run {
        info!("Dry run, not publishing");
        return Ok((verdict, None));
    }

    let outcome = checker.publish(pull_request, &verdict).await?;
    Ok((verdict, Some(outcome)))
}

/// Runs `check` against the environment and prints the verdict as JSON.
pub async fn execute(args: &CheckArgs) -> Result<(), Error> {
    let pull_request = match &args.file {
        Some(path) => read_pull_request(File::open(path).map_err(Error::ReadInput)?)?,
        None => read_pull_request(io::stdin().lock())?,
    };

    let checker = crate::commands::checker_from_env().await?;
    let (verdict, outcome) = check(&checker, &pull_request, args.dry_run).await?;
    if let Some(outcome) = outcome {
        info!(outcome = ?outcome, "Published");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&verdict).map_err(Error::Output)?
    );
    Ok(())
}
