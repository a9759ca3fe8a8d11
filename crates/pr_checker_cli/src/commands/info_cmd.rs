//! Show the verdict for a live pull request.

use clap::{Args, ValueEnum};
use colored::Colorize;
use github_client::models::PullRequest;
use pr_checker_core::{PullRequestChecker, Verdict};
use tracing::instrument;

use crate::commands::PullRequestArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "info_cmd_tests.rs"]
mod tests;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    #[command(flatten)]
    pub pull_request: PullRequestArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Fetches and evaluates a pull request without publishing anything.
#[instrument(skip(checker))]
pub async fn info(
    checker: &PullRequestChecker,
    args: &PullRequestArgs,
) -> Result<(PullRequest, Verdict), Error> {
    let pull_request = checker
        .fetch_pull_request(&args.owner, &args.repo, args.number)
        .await?;
    let verdict = checker.evaluate(&pull_request).await?;
    Ok((pull_request, verdict))
}

pub async fn execute(args: &InfoArgs) -> Result<(), Error> {
    let checker = crate::commands::checker_from_env().await?;
    let (pull_request, verdict) = info(&checker, &args.pull_request).await?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&verdict).map_err(Error::Output)?,
        OutputFormat::Pretty => format_verdict_pretty(&pull_request, &verdict),
    };
    println!("{}", output);
    Ok(())
}

/// Format a verdict in pretty/human-readable format.
pub fn format_verdict_pretty(pull_request: &PullRequest, verdict: &Verdict) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n\n",
        format!(
            "{}/{}#{}",
            pull_request.owner(),
            pull_request.repo(),
            pull_request.number
        )
        .bold()
        .bright_cyan(),
        pull_request.title
    ));

    if verdict.pass {
        output.push_str(&format!("{}\n", "✓ PASS".green().bold()));
    } else {
        output.push_str(&format!("{}\n", "✗ FAIL".red().bold()));
    }
    output.push_str(&format!("{}\n\n", verdict.description));

    let none = || "(none)".dimmed().to_string();
    output.push_str(&format!(
        "{}: {}\n",
        "Ticket".bold(),
        verdict.issue_key.clone().unwrap_or_else(none)
    ));
    output.push_str(&format!(
        "{}: {}\n",
        "Ticket status".bold(),
        verdict.jira_status.clone().unwrap_or_else(none)
    ));
    output.push_str(&format!("{}: {}\n", "Commits".bold(), verdict.num_commits));
    if verdict.is_maint_merge {
        output.push_str(&format!(
            "{}: {}\n",
            "Maintenance merge".bold(),
            "yes".yellow()
        ));
    }

    if let Some(commit) = &verdict.bad_commit {
        output.push_str(&format!(
            "\n{} {}: {}\n",
            "✗".red(),
            commit.sha.dimmed(),
            commit.commit.message.lines().next().unwrap_or_default()
        ));
    }

    if let Some(extended) = &verdict.extended_description {
        output.push_str(&format!("\n{}\n", extended));
    }

    output
}
