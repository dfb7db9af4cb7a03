//! # Message Data Sources
//!
//! A [`MessageSource`] hands out pages of [`RawMessage`] records with an
//! opaque continuation [`PageCursor`]. The feed never looks inside a cursor;
//! it passes back whatever the previous page returned.
//!
//! ## Sources
//!
//! - [`SuiMessageSource`]: reads message objects that hang off a Sui message
//!   board as dynamic fields, via the full node JSON-RPC API
//!
//! Sources must tolerate partial records. A record with missing or mistyped
//! fields is parsed with defaults (numbers to 0, strings to empty, unknown
//! status codes to `NORMAL`) instead of failing the page.
//!
//! ```ignore
//! let source = SuiMessageSource::from_config(&config.sui);
//! let first = source.fetch_page(None, 20).await?;
//! let second = source.fetch_page(first.next_cursor.as_ref(), 20).await?;
//! ```

mod parse;
mod sui;
mod types;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;

pub use sui::SuiMessageSource;
pub use types::*;

/// Number of messages requested per page
pub const PAGE_LIMIT: usize = 20;

/// Paginated supplier of raw messages.
#[async_trait]
pub trait MessageSource: Send + Sync + Debug {
    /// Fetch up to `limit` messages starting at `cursor` (`None` for the first page).
    async fn fetch_page(&self, cursor: Option<&PageCursor>, limit: usize) -> Result<MessagePage>;
}

