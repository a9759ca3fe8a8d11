//! The pull request checker.

use std::sync::Arc;

use github_client::models::PullRequest;
use github_client::PullRequestClient;
use jira_client::TicketClient;
use tracing::{debug, info, instrument};

use crate::configuration::CheckerConfig;
use crate::errors::{CheckerError, CheckerResult};
use crate::flags::PullRequestFlags;
use crate::identifier::parse_issue_key;
use crate::verdict::{decide, is_maint_merge, Verdict};

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;

/// Checks pull requests against the ticket and commit rules and reports the results.
///
/// The checker holds no state between calls; every evaluation works on a fresh
/// snapshot of the pull request and ticket.
#[derive(Clone)]
pub struct PullRequestChecker {
    pub(crate) config: Arc<CheckerConfig>,
    pub(crate) github: Arc<dyn PullRequestClient>,
    pub(crate) tracker: Arc<dyn TicketClient>,
}

impl PullRequestChecker {
    pub fn new(
        config: Arc<CheckerConfig>,
        github: Arc<dyn PullRequestClient>,
        tracker: Arc<dyn TicketClient>,
    ) -> Self {
        Self {
            config,
            github,
            tracker,
        }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Fetches the current snapshot of a pull request.
    pub async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> CheckerResult<PullRequest> {
        Ok(self.github.get_pull_request(owner, repo, pull_number).await?)
    }

    /// Evaluates a pull request.
    ///
    /// A title without a ticket fails straight away without contacting either
    /// collaborator. Otherwise the ticket and the commit listing are fetched
    /// concurrently and both must succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch fails. Failing rules are reported through
    /// the returned [`Verdict`], never as an error.
    #[instrument(skip(self, pull_request), fields(owner = %pull_request.owner(), repo = %pull_request.repo(), pull_number = pull_request.number))]
    pub async fn evaluate(&self, pull_request: &PullRequest) -> CheckerResult<Verdict> {
        let pr_flags = PullRequestFlags::parse(pull_request.body_text());

        let Some(issue_key) = parse_issue_key(&pull_request.title) else {
            debug!("Title does not start with a ticket");
            return Ok(Verdict::missing_issue_key(pr_flags));
        };

        let (ticket, commits) = tokio::try_join!(
            async {
                self.tracker
                    .fetch_ticket(issue_key)
                    .await
                    .map_err(CheckerError::from)
            },
            async {
                self.github
                    .list_pull_request_commits(
                        pull_request.owner(),
                        pull_request.repo(),
                        pull_request.number,
                    )
                    .await
                    .map_err(CheckerError::from)
            },
        )?;

        let maint_merge = is_maint_merge(&self.config, pull_request);
        let verdict = decide(
            &self.config,
            issue_key,
            ticket.as_ref(),
            &commits,
            maint_merge,
            pr_flags,
        );

        info!(
            issue_key = issue_key,
            pass = verdict.pass,
            num_commits = verdict.num_commits,
            description = %verdict.description,
            "Evaluated pull request"
        );
        Ok(verdict)
    }
}
