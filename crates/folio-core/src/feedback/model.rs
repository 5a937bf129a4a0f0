//! FeedbackItem domain model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Title used when a feedback item is submitted with a blank title.
pub const DEFAULT_FEEDBACK_TITLE: &str = "General Feedback";

/// Per-user feedback lists, keyed by username. Each list is newest-first.
pub type FeedbackBook = BTreeMap<String, Vec<FeedbackItem>>;

/// A single user-submitted note. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    /// Creation timestamp in milliseconds, rendered as a decimal string.
    pub id: String,
    pub title: String,
    /// Never empty for a persisted item.
    pub content: String,
    /// Username of the session that submitted the item. Not a verified identity.
    pub submitter: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Unvalidated title/content pair as it arrives from a form or the CLI.
#[derive(Debug, Clone, Default)]
pub struct FeedbackDraft {
    pub title: String,
    pub content: String,
}

impl FeedbackDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Trims both fields, substitutes the default title for a blank one and
    /// rejects blank content.
    pub fn normalize(&self) -> Result<(String, String)> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(FolioError::validation("Feedback content cannot be empty"));
        }

        let title = match self.title.trim() {
            "" => DEFAULT_FEEDBACK_TITLE,
            trimmed => trimmed,
        };

        Ok((title.to_string(), content.to_string()))
    }

    /// Builds the stored item for `submitter` at `timestamp`.
    pub fn into_item(self, id: String, submitter: &str, timestamp: i64) -> Result<FeedbackItem> {
        let (title, content) = self.normalize()?;
        Ok(FeedbackItem {
            id,
            title,
            content,
            submitter: submitter.to_string(),
            timestamp,
        })
    }
}
