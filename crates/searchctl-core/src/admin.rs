// ── Admin actions ──
//
// Command handlers for the domain and keyword management forms. Each one
// trims its input, performs a single admin API call, and answers with a
// fixed success or failure message. Error detail goes to the log only.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use searchctl_api::{AdminClient, ListOp};

// ── Feedback ────────────────────────────────────────────────────────

pub const OPERATION_SUCCEEDED: &str = "Operation succeeded";
pub const OPERATION_FAILED: &str = "Operation failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackLevel {
    Success,
    Failure,
}

/// The message a host shows after an admin action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: &'static str,
}

impl Feedback {
    pub fn success(message: &'static str) -> Self {
        Self {
            level: FeedbackLevel::Success,
            message,
        }
    }

    pub fn failure(message: &'static str) -> Self {
        Self {
            level: FeedbackLevel::Failure,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == FeedbackLevel::Success
    }

    /// Clear the submitted field on success; leave it untouched otherwise.
    pub fn apply_to(&self, field: &mut impl TextField) {
        if self.is_success() {
            field.clear();
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

// ── Form inputs ─────────────────────────────────────────────────────

/// A text input an admin form reads from.
pub trait TextField {
    fn text(&self) -> &str;
    fn clear(&mut self);
}

impl TextField for String {
    fn text(&self) -> &str {
        self
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

/// Form submissions, one per input-bound action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Submit domains for crawling.
    IncludeDomain,
    /// Add a domain to the crawl blacklist.
    BlacklistDomain,
    /// Add an illegal keyword.
    AddKeyword,
}

impl Trigger {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::IncludeDomain => "Domains submitted for crawling",
            Self::BlacklistDomain => "Domain added to blacklist",
            Self::AddKeyword => "Illegal keyword added",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::IncludeDomain => "Failed to include domains",
            Self::BlacklistDomain => "Failed to add domain to blacklist",
            Self::AddKeyword => "Failed to add illegal keyword",
        }
    }
}

// ── Managed lists ───────────────────────────────────────────────────

/// The two server-side lists with a refresh and per-row delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    DomainBlacklist,
    IllegalKeywords,
}

impl ListKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::DomainBlacklist => "Domain blacklist",
            Self::IllegalKeywords => "Illegal keywords",
        }
    }

    /// Column header for the entry value.
    pub fn entry_label(self) -> &'static str {
        match self {
            Self::DomainBlacklist => "Domain",
            Self::IllegalKeywords => "Keyword",
        }
    }
}

/// One rendered list entry. `key` is its position within the render it
/// came from; `value` is what a delete of this row sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub key: usize,
    pub value: String,
}

/// A freshly fetched list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTable {
    pub kind: ListKind,
    pub rows: Vec<ListRow>,
}

impl ListTable {
    pub fn from_entries(kind: ListKind, entries: Vec<String>) -> Self {
        let rows = entries
            .into_iter()
            .enumerate()
            .map(|(key, value)| ListRow { key, value })
            .collect();
        Self { kind, rows }
    }

    pub fn row(&self, key: usize) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of deleting one list row.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub feedback: Feedback,
    /// The re-fetched list; present only when the delete succeeded.
    pub refreshed: Option<Result<ListTable, Feedback>>,
}

// ── Controller ──────────────────────────────────────────────────────

/// Executes admin actions against the backend.
#[derive(Debug, Clone)]
pub struct AdminActions {
    client: Arc<AdminClient>,
}

impl AdminActions {
    pub fn new(client: Arc<AdminClient>) -> Self {
        Self { client }
    }

    /// Run a form action with the given raw input.
    pub async fn execute(&self, trigger: Trigger, raw: &str) -> Feedback {
        let value = raw.trim();
        let result = match trigger {
            Trigger::IncludeDomain => self.client.include_domains(value).await,
            Trigger::BlacklistDomain => {
                self.client
                    .manage_domain_blacklist(value, ListOp::Add)
                    .await
            }
            Trigger::AddKeyword => {
                self.client
                    .manage_illegal_keyword(value, ListOp::Add)
                    .await
            }
        };

        match result {
            Ok(()) => {
                info!(?trigger, value, "admin action succeeded");
                Feedback::success(trigger.success_message())
            }
            Err(e) => {
                warn!(?trigger, value, error = %e, "admin action failed");
                Feedback::failure(trigger.failure_message())
            }
        }
    }

    /// Run a form action from `field`, clearing it only on success.
    pub async fn submit(&self, trigger: Trigger, field: &mut impl TextField) -> Feedback {
        let feedback = self.execute(trigger, field.text()).await;
        feedback.apply_to(field);
        feedback
    }

    /// Fetch a list in full.
    pub async fn refresh_list(&self, kind: ListKind) -> Result<ListTable, Feedback> {
        let result = match kind {
            ListKind::DomainBlacklist => self.client.domain_blacklist().await,
            ListKind::IllegalKeywords => self.client.illegal_keywords().await,
        };
        result
            .map(|entries| ListTable::from_entries(kind, entries))
            .map_err(|e| {
                warn!(?kind, error = %e, "list refresh failed");
                Feedback::failure(OPERATION_FAILED)
            })
    }

    /// Delete the entry carried by `row`, then re-fetch the list.
    pub async fn delete_entry(&self, kind: ListKind, row: &ListRow) -> DeleteOutcome {
        let result = match kind {
            ListKind::DomainBlacklist => {
                self.client
                    .manage_domain_blacklist(&row.value, ListOp::Del)
                    .await
            }
            ListKind::IllegalKeywords => {
                self.client
                    .manage_illegal_keyword(&row.value, ListOp::Del)
                    .await
            }
        };

        match result {
            Ok(()) => {
                info!(?kind, value = %row.value, "list entry deleted");
                DeleteOutcome {
                    feedback: Feedback::success(OPERATION_SUCCEEDED),
                    refreshed: Some(self.refresh_list(kind).await),
                }
            }
            Err(e) => {
                warn!(?kind, value = %row.value, error = %e, "list entry delete failed");
                DeleteOutcome {
                    feedback: Feedback::failure(OPERATION_FAILED),
                    refreshed: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_clears_only_on_success() {
        let mut field = String::from("example.com");
        Feedback::failure(OPERATION_FAILED).apply_to(&mut field);
        assert_eq!(field, "example.com");
        Feedback::success(OPERATION_SUCCEEDED).apply_to(&mut field);
        assert!(field.is_empty());
    }

    #[test]
    fn list_rows_are_keyed_by_position() {
        let table = ListTable::from_entries(
            ListKind::IllegalKeywords,
            vec!["a".into(), "b".into(), "a".into()],
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.row(2).map(|r| r.value.as_str()), Some("a"));
        assert_eq!(table.row(1).map(|r| r.key), Some(1));
        assert!(table.row(3).is_none());
    }

    #[test]
    fn every_trigger_has_distinct_messages() {
        for trigger in [
            Trigger::IncludeDomain,
            Trigger::BlacklistDomain,
            Trigger::AddKeyword,
        ] {
            assert_ne!(trigger.success_message(), trigger.failure_message());
        }
    }
}
