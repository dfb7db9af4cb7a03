//! Core types for the message data source.
//!
//! Records here are produced by a [`MessageSource`](super::MessageSource) and
//! are never mutated after they are fetched.

use serde::{Deserialize, Serialize};

/// Moderation status of an on-chain message.
///
/// Discriminants match the status codes stored on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    #[default]
    Normal,
    UnderReview,
    Hyped,
    Spam,
    Deleted,
}

impl MessageStatus {
    const BY_CODE: [MessageStatus; 5] = [
        MessageStatus::Normal,
        MessageStatus::UnderReview,
        MessageStatus::Hyped,
        MessageStatus::Spam,
        MessageStatus::Deleted,
    ];

    /// Decode an on-chain status code. Unknown codes decode as `Normal`.
    pub fn from_code(code: u64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::BY_CODE.get(idx).copied())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Hyped => "HYPED",
            Self::Spam => "SPAM",
            Self::Deleted => "DELETED",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message object as read from the message board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    pub object_id: String,
    pub author: String,
    pub title_hash: String,
    pub content_hash: String,
    pub tags: Vec<String>,
    pub likes: u64,
    pub alerts: u64,
    pub status: MessageStatus,
    /// Status code the `status` field was decoded from
    pub status_raw: u64,
    pub created_epoch: u64,
    pub updated_epoch: u64,
}

impl RawMessage {
    /// Create a normal-status message with only an id set
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counts(mut self, likes: u64, alerts: u64) -> Self {
        self.likes = likes;
        self.alerts = alerts;
        self
    }

    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = status;
        self.status_raw = MessageStatus::BY_CODE
            .iter()
            .position(|s| *s == status)
            .unwrap_or_default() as u64;
        self
    }

    pub fn with_epochs(mut self, created: u64, updated: u64) -> Self {
        self.created_epoch = created;
        self.updated_epoch = updated;
        self
    }
}

/// Opaque cursor for pull-based page access
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(pub String);

impl PageCursor {
    pub fn new(cursor: impl Into<String>) -> Self {
        Self(cursor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One batch of messages plus the continuation state needed for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub messages: Vec<RawMessage>,
    pub next_cursor: Option<PageCursor>,
    pub has_next_page: bool,
}

impl MessagePage {
    /// A terminal page with no messages and nothing after it
    pub fn empty() -> Self {
        Self::default()
    }
}
