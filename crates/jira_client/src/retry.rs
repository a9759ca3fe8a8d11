//! Bounded retry around a [`TicketClient`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::{Error, Ticket, TicketClient};

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;

/// Wraps a [`TicketClient`] and retries a transient failure exactly once after a
/// fixed delay. If the retry fails too, its error is returned.
pub struct RetryingTicketClient<C> {
    inner: C,
    delay: Duration,
}

impl<C: TicketClient> RetryingTicketClient<C> {
    pub fn new(inner: C, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<C: TicketClient> TicketClient for RetryingTicketClient<C> {
    async fn fetch_ticket(&self, issue_key: &str) -> Result<Option<Ticket>, Error> {
        match self.inner.fetch_ticket(issue_key).await {
            Err(e) if e.is_transient() => {
                warn!(
                    issue_key = issue_key,
                    error = %e,
                    delay_ms = self.delay.as_millis() as u64,
                    "Ticket lookup failed, retrying once"
                );
                tokio::time::sleep(self.delay).await;
                self.inner.fetch_ticket(issue_key).await
            }
            other => other,
        }
    }
}
