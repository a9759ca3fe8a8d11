//! # PR Checker Core
//!
//! Validation of GitHub pull requests against Jira tickets.
//!
//! ## Overview
//!
//! Every pull request title must start with a ticket key such as `ICU-12345`. The
//! checker looks the ticket up, confirms it is in an approved status, and checks
//! that the pull request consists of a single commit referencing the same ticket.
//! The outcome is a [`Verdict`], which is published to GitHub as commit statuses.
//!
//! The main entry points are:
//! - [`PullRequestChecker::evaluate`] - compute the verdict for a pull request
//! - [`PullRequestChecker::publish`] - post the verdict as commit statuses
//! - [`PullRequestChecker::reconcile_force_push`] - comment on file changes across a force-push
//! - [`squash`] - replace a pull request branch with a single commit
//!
//! Collaborators are injected through the [`github_client::PullRequestClient`],
//! [`github_client::GitDataClient`] and [`jira_client::TicketClient`] traits, and
//! configuration is an explicit [`CheckerConfig`] value built once at start-up.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use pr_checker_core::{
//!     BotCredentials, CheckerConfig, ClientProvider, GitHubClientProvider, PullRequestChecker,
//!     TrackerSettings,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(CheckerConfig::from_env()?);
//! let tracker = Arc::new(TrackerSettings::from_env()?.create_client()?);
//! let provider = GitHubClientProvider::new(BotCredentials::from_env()?);
//!
//! let checker = PullRequestChecker::new(config, provider.bot_client().await?, tracker);
//! let pull_request = checker.fetch_pull_request("unicode-org", "icu", 42).await?;
//! let verdict = checker.evaluate(&pull_request).await?;
//! checker.publish(&pull_request, &verdict).await?;
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod configuration;
pub mod errors;
pub mod flags;
pub mod force_push;
pub mod github_auth;
pub mod identifier;
pub mod publish;
pub mod squash;
pub mod verdict;

pub use checker::PullRequestChecker;
pub use configuration::{CheckerConfig, CommitterIdentity, TrackerSettings};
pub use errors::{CheckerError, CheckerResult};
pub use flags::{FlagValue, PullRequestFlags};
pub use force_push::{compare_file_changes, FileDiscrepancy, ForcePushOutcome};
pub use github_auth::{BotCredentials, ClientProvider, GitHubClientProvider};
pub use identifier::parse_issue_key;
pub use publish::{PublishOutcome, SkipReason};
pub use squash::{squash, SquashRequest};
pub use verdict::Verdict;
