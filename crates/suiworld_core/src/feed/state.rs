//! Paginated feed state with single-flight loading.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SuiworldConfig;
use crate::data_source::{
    MessagePage, MessageSource, PAGE_LIMIT, PageCursor, RawMessage, SuiMessageSource,
};

use super::types::{FeedEntry, FeedOptions, FeedSort};
use super::view::{available_tags, project};

/// Result of a `refresh` or `load_more` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was applied; `appended` counts messages that were new
    Loaded { appended: usize },
    /// Another load was already in flight; nothing was requested
    Busy,
    /// The source reported no further pages; nothing was requested
    Exhausted,
    /// The fetch failed and the error was recorded on the feed
    Failed,
    /// The response arrived after the feed was detached and was dropped
    Stale,
    /// The feed is detached and no longer loads
    Detached,
}

/// Mutable state behind a [`Feed`].
#[derive(Debug, Default)]
struct FeedState {
    messages: Vec<RawMessage>,
    cursor: Option<PageCursor>,
    has_more: bool,
    is_loading: bool,
    error: Option<String>,
    options: FeedOptions,
    detached: bool,
}

impl FeedState {
    /// Apply a fetched page, dropping ids already present (first seen wins).
    fn apply_page(&mut self, page: MessagePage, reset: bool) -> usize {
        if reset {
            self.messages.clear();
        }

        let mut seen: HashSet<String> = self
            .messages
            .iter()
            .map(|m| m.object_id.clone())
            .collect();
        let received = page.messages.len();
        let before = self.messages.len();
        self.messages.extend(
            page.messages
                .into_iter()
                .filter(|m| seen.insert(m.object_id.clone())),
        );
        let appended = self.messages.len() - before;
        if appended < received {
            debug!(
                duplicates = received - appended,
                "dropped duplicate messages from page"
            );
        }

        self.cursor = page.next_cursor;
        self.has_more = page.has_next_page;
        appended
    }
}

/// Everything a feed view renders, computed from one consistent state read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub entries: Vec<FeedEntry>,
    pub raw_messages: Vec<RawMessage>,
    pub available_tags: Vec<String>,
    pub selected_tags: Vec<String>,
    pub search: String,
    pub sort: FeedSort,
    pub has_more: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Clears the busy flag if a load future is dropped before it completes.
struct InFlight<'a> {
    state: &'a Mutex<FeedState>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().is_loading = false;
        }
    }
}

/// A cursor-paginated, filterable message feed.
///
/// The feed owns the accumulated messages and the filter parameters. At most
/// one page fetch is in flight at a time; calls made while a fetch is pending
/// return [`LoadOutcome::Busy`] without touching the source. The state lock is
/// never held across the fetch.
///
/// Fetch failures are recorded as a display string (see [`Feed::snapshot`])
/// and leave the accumulated messages, cursor, and `has_more` untouched.
#[derive(Debug)]
pub struct Feed {
    source: Arc<dyn MessageSource>,
    page_limit: usize,
    state: Mutex<FeedState>,
}

impl Feed {
    pub fn new(source: Arc<dyn MessageSource>) -> Self {
        Self {
            source,
            page_limit: PAGE_LIMIT,
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Feed over the configured Sui message board
    pub fn from_config(config: &SuiworldConfig) -> Self {
        Self::new(Arc::new(SuiMessageSource::from_config(&config.sui)))
            .with_page_limit(config.feed.page_limit)
    }

    /// Start with the given filter parameters
    pub fn with_options(self, options: FeedOptions) -> Self {
        self.state.lock().options = options;
        self
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    /// Initial load when the view is shown. Same as [`Feed::refresh`].
    pub async fn mount(&self) -> LoadOutcome {
        self.load(true).await
    }

    /// Reload from the first page, replacing accumulated messages on success.
    pub async fn refresh(&self) -> LoadOutcome {
        self.load(true).await
    }

    /// Append the next page, if there is one and nothing else is loading.
    pub async fn load_more(&self) -> LoadOutcome {
        self.load(false).await
    }

    /// Tear down the feed. In-flight responses are dropped when they arrive.
    pub fn detach(&self) {
        let mut state = self.state.lock();
        state.detached = true;
        debug!(in_flight = state.is_loading, "feed detached");
    }

    async fn load(&self, reset: bool) -> LoadOutcome {
        let cursor = {
            let mut state = self.state.lock();
            if state.detached {
                return LoadOutcome::Detached;
            }
            if state.is_loading {
                return LoadOutcome::Busy;
            }
            if !reset && !state.has_more {
                return LoadOutcome::Exhausted;
            }
            state.is_loading = true;
            state.error = None;
            if reset { None } else { state.cursor.clone() }
        };
        let mut in_flight = InFlight {
            state: &self.state,
            armed: true,
        };

        let result = self.source.fetch_page(cursor.as_ref(), self.page_limit).await;

        in_flight.armed = false;
        let mut state = self.state.lock();
        state.is_loading = false;
        if state.detached {
            debug!("dropping page that arrived after detach");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let appended = state.apply_page(page, reset);
                debug!(
                    reset,
                    appended,
                    total = state.messages.len(),
                    has_more = state.has_more,
                    "feed page loaded"
                );
                LoadOutcome::Loaded { appended }
            }
            Err(e) => {
                warn!(reset, error = %e, "feed load failed");
                state.error = Some(e.display_message());
                LoadOutcome::Failed
            }
        }
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.state.lock().options.search = search.into();
    }

    /// Select `tag` if it is not selected, otherwise deselect it.
    pub fn toggle_tag(&self, tag: &str) {
        let mut state = self.state.lock();
        let tags = &mut state.options.tags;
        if let Some(idx) = tags.iter().position(|t| t == tag) {
            tags.remove(idx);
        } else {
            tags.push(tag.to_string());
        }
    }

    pub fn clear_tags(&self) {
        self.state.lock().options.tags.clear();
    }

    pub fn set_sort(&self, sort: FeedSort) {
        self.state.lock().options.sort = sort;
    }

    pub fn options(&self) -> FeedOptions {
        self.state.lock().options.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Accumulated messages in load order, unfiltered
    pub fn raw_messages(&self) -> Vec<RawMessage> {
        self.state.lock().messages.clone()
    }

    /// Filtered, sorted, status-annotated entries
    pub fn entries(&self) -> Vec<FeedEntry> {
        let (messages, options) = {
            let state = self.state.lock();
            (state.messages.clone(), state.options.clone())
        };
        project(&messages, &options)
    }

    /// Sorted union of tags across all accumulated messages
    pub fn available_tags(&self) -> Vec<String> {
        available_tags(&self.state.lock().messages)
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let (messages, options, has_more, is_loading, error) = {
            let state = self.state.lock();
            (
                state.messages.clone(),
                state.options.clone(),
                state.has_more,
                state.is_loading,
                state.error.clone(),
            )
        };

        FeedSnapshot {
            entries: project(&messages, &options),
            available_tags: available_tags(&messages),
            raw_messages: messages,
            selected_tags: options.tags,
            search: options.search,
            sort: options.sort,
            has_more,
            is_loading,
            error,
        }
    }
}
