//! Issue tracker data models.

use serde::{Deserialize, Serialize};

/// The workflow status of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStatus {
    /// Display name, e.g. `Accepted`
    pub name: String,
}

/// The ticket fields the checker reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFields {
    pub status: TicketStatus,
    #[serde(default)]
    pub summary: String,
}

/// A read-only snapshot of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier, e.g. `ICU-20001`
    pub key: String,
    pub fields: TicketFields,
}

impl Ticket {
    pub fn status_name(&self) -> &str {
        &self.fields.status.name
    }

    pub fn summary(&self) -> &str {
        &self.fields.summary
    }
}

/// The issue resource as returned by the REST API. Issues the caller may not see
/// can come back without fields.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    pub key: Option<String>,
    pub fields: Option<TicketFields>,
}

/// Error body returned by the REST API.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default, rename = "errorMessages")]
    pub error_messages: Vec<String>,
}
