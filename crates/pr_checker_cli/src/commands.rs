//! Command modules for the PR Checker CLI.
//!
//! - `check_cmd`: Evaluate a pull request snapshot and publish the result
//! - `download_cmd`: Fetch a pull request snapshot for offline checking
//! - `info_cmd`: Evaluate a live pull request and print the verdict
//!
//! The commands read their settings from the environment the same way the
//! service does.

use std::sync::Arc;

use clap::Args;
use github_client::PullRequestClient;
use pr_checker_core::{
    BotCredentials, CheckerConfig, ClientProvider, GitHubClientProvider, PullRequestChecker,
    TrackerSettings,
};

use crate::errors::Error;

pub mod check_cmd;
pub mod download_cmd;
pub mod info_cmd;

/// Identifies one pull request on GitHub.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PullRequestArgs {
    /// Repository owner (organization or user)
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Pull request number
    #[arg(long)]
    pub number: u64,
}

/// Creates a GitHub client acting as the bot.
pub async fn bot_client_from_env() -> Result<Arc<dyn PullRequestClient>, Error> {
    let provider = GitHubClientProvider::new(BotCredentials::from_env()?);
    Ok(provider.bot_client().await?)
}

/// Creates a checker from the process environment.
pub async fn checker_from_env() -> Result<PullRequestChecker, Error> {
    let config = CheckerConfig::from_env()?;
    let tracker = TrackerSettings::from_env()?.create_client()?;
    let github = bot_client_from_env().await?;
    Ok(PullRequestChecker::new(
        Arc::new(config),
        github,
        Arc::new(tracker),
    ))
}
