use std::collections::BTreeSet;

use crate::data_source::RawMessage;

use super::filter::{apply_search, apply_tags};
use super::sort::sort_messages;
use super::types::{FeedEntry, FeedOptions};

/// Build the display view of the accumulated messages.
///
/// Order is fixed: derive status, search, tag filter, sort. Status has to be
/// known before the `under_review` sort can group entries.
pub fn project(messages: &[RawMessage], options: &FeedOptions) -> Vec<FeedEntry> {
    let entries: Vec<FeedEntry> = messages.iter().cloned().map(FeedEntry::from).collect();
    let entries = apply_search(entries, &options.search);
    let entries = apply_tags(entries, &options.tags);
    sort_messages(entries, options.sort)
}

/// Sorted union of every tag in the accumulated messages, ignoring filters.
pub fn available_tags(messages: &[RawMessage]) -> Vec<String> {
    messages
        .iter()
        .flat_map(|message| message.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
