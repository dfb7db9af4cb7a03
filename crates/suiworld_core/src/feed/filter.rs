//! Text search and tag filtering over feed entries.
//!
//! Both filters take ownership of the entries and return the survivors in
//! their original order. Search is a disjunction over fields; tag filtering is
//! a conjunction over the selected tags.

use super::types::FeedEntry;

/// Keep entries where any of id, author, hashes or tags contains `term`.
///
/// Matching is case-insensitive. A blank term returns the input unchanged.
pub fn apply_search(entries: Vec<FeedEntry>, term: &str) -> Vec<FeedEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    entries
        .into_iter()
        .filter(|entry| {
            let message = &entry.message;
            contains(&message.object_id)
                || contains(&message.author)
                || contains(&message.title_hash)
                || contains(&message.content_hash)
                || message.tags.iter().any(|tag| contains(tag))
        })
        .collect()
}

/// Keep entries carrying every selected tag (case-insensitive).
///
/// An empty selection returns the input unchanged.
pub fn apply_tags(entries: Vec<FeedEntry>, selected: &[String]) -> Vec<FeedEntry> {
    if selected.is_empty() {
        return entries;
    }

    let wanted: Vec<String> = selected.iter().map(|tag| tag.to_lowercase()).collect();
    entries
        .into_iter()
        .filter(|entry| {
            wanted.iter().all(|tag| {
                entry
                    .message
                    .tags
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == *tag)
            })
        })
        .collect()
}
