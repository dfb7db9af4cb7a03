//! # Feed Projection
//!
//! Turns accumulated message pages into the list a feed view displays.
//!
//! ## Pipeline
//!
//! Every view is rebuilt from the raw messages in a fixed order:
//!
//! ```text
//! raw messages -> derive_status -> apply_search -> apply_tags -> sort_messages
//! ```
//!
//! - [`derive_status`] promotes `NORMAL` messages to `UNDER_REVIEW` once likes
//!   or alerts reach [`LIKES_THRESHOLD`] / [`ALERTS_THRESHOLD`]
//! - [`apply_search`] keeps entries where any text field contains the term
//! - [`apply_tags`] keeps entries carrying all selected tags
//! - [`sort_messages`] orders by a [`FeedSort`] key, stably
//!
//! All four are pure functions; [`project`] chains them.
//!
//! ## Pagination
//!
//! [`Feed`] owns the accumulated messages, the continuation cursor and the
//! filter parameters, and fetches pages from a
//! [`MessageSource`](crate::data_source::MessageSource) one at a time.
//!
//! ```ignore
//! let feed = Feed::from_config(&config);
//! feed.mount().await;
//! feed.toggle_tag("defi");
//! feed.set_sort(FeedSort::Likes);
//! let view = feed.snapshot();
//! if view.has_more {
//!     feed.load_more().await;
//! }
//! ```

mod derive;
mod filter;
mod sort;
mod state;
mod types;
mod view;


pub use derive::{ALERTS_THRESHOLD, DerivedStatus, LIKES_THRESHOLD, derive_status};
pub use filter::{apply_search, apply_tags};
pub use sort::sort_messages;
pub use state::{Feed, FeedSnapshot, LoadOutcome};
pub use types::{FeedEntry, FeedOptions, FeedSort, StatusReason};
pub use view::{available_tags, project};
