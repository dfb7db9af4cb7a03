use std::cmp::Ordering;

use super::types::{FeedEntry, FeedSort};

fn newer_first(a: &FeedEntry, b: &FeedEntry) -> Ordering {
    b.message.updated_epoch.cmp(&a.message.updated_epoch)
}

fn more_liked_first(a: &FeedEntry, b: &FeedEntry) -> Ordering {
    b.message
        .likes
        .cmp(&a.message.likes)
        .then_with(|| newer_first(a, b))
}

/// Order entries for display.
///
/// The sort is stable: entries that compare equal keep their input order.
pub fn sort_messages(mut entries: Vec<FeedEntry>, sort: FeedSort) -> Vec<FeedEntry> {
    match sort {
        FeedSort::Latest => entries.sort_by(newer_first),
        FeedSort::Likes => entries.sort_by(more_liked_first),
        FeedSort::Alerts => entries.sort_by(|a, b| {
            b.message
                .alerts
                .cmp(&a.message.alerts)
                .then_with(|| newer_first(a, b))
        }),
        FeedSort::UnderReview => entries.sort_by(|a, b| {
            b.is_under_review()
                .cmp(&a.is_under_review())
                .then_with(|| more_liked_first(a, b))
        }),
    }
    entries
}
