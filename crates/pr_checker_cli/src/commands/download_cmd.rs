//! Download a pull request snapshot.

use github_client::PullRequestClient;
use tracing::instrument;

use crate::commands::PullRequestArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "download_cmd_tests.rs"]
mod tests;

/// Fetches a pull request and renders it as snapshot JSON.
///
/// The output can be fed back to `pr-checker check`.
#[instrument(skip(github))]
pub async fn download(
    github: &dyn PullRequestClient,
    args: &PullRequestArgs,
) -> Result<String, Error> {
    let pull_request = github
        .get_pull_request(&args.owner, &args.repo, args.number)
        .await
        .map_err(pr_checker_core::CheckerError::from)?;
    serde_json::to_string_pretty(&pull_request).map_err(Error::Output)
}

pub async fn execute(args: &PullRequestArgs) -> Result<(), Error> {
    let github = crate::commands::bot_client_from_env().await?;
    println!("{}", download(github.as_ref(), args).await?);
    Ok(())
}
