use serde::{Deserialize, Serialize};

use crate::data_source::{MessageStatus, RawMessage};

/// Ordering applied to the feed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    /// Most recently updated first
    #[default]
    Latest,
    /// Most liked first
    Likes,
    /// Most alerted first
    Alerts,
    /// Messages under review first, then by likes
    UnderReview,
}

impl FeedSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Likes => "likes",
            Self::Alerts => "alerts",
            Self::UnderReview => "under_review",
        }
    }

    /// Parse a wire name, falling back to [`FeedSort::Latest`] for unknown names.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "likes" => Self::Likes,
            "alerts" => Self::Alerts,
            "under_review" => Self::UnderReview,
            _ => Self::Latest,
        }
    }
}

impl std::fmt::Display for FeedSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a normal message is displayed as under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusReason {
    LikesThreshold,
    AlertsThreshold,
}

/// A raw message annotated with its display status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    #[serde(flatten)]
    pub message: RawMessage,
    pub displayed_status: MessageStatus,
    pub status_reason: Option<StatusReason>,
    /// Likes still needed before promotion; `None` for terminal statuses
    pub likes_to_threshold: Option<u64>,
    /// Alerts still needed before promotion; `None` for terminal statuses
    pub alerts_to_threshold: Option<u64>,
}

impl FeedEntry {
    pub fn object_id(&self) -> &str {
        &self.message.object_id
    }

    pub fn is_under_review(&self) -> bool {
        self.displayed_status == MessageStatus::UnderReview
    }
}

/// Client-side filter and sort parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    pub search: String,
    pub tags: Vec<String>,
    pub sort: FeedSort,
}

impl FeedOptions {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
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

    pub fn with_sort(mut self, sort: FeedSort) -> Self {
        self.sort = sort;
        self
    }
}
