//! SuiWorld Core - Feed projection and client collaborators
//!
//! This crate provides the message feed pipeline for the SuiWorld SocialFi
//! app: reading message objects from a Sui message board, classifying them
//! by engagement thresholds, filtering and sorting them for display, and
//! accumulating cursor-paginated pages. It also carries the wallet/swap
//! backend client the app talks to.

pub mod config;
pub mod data_source;
pub mod error;
pub mod feed;
pub mod wallet;

#[cfg(test)]
pub mod test_helpers;

pub use config::SuiworldConfig;
pub use data_source::{
    MessagePage, MessageSource, MessageStatus, PageCursor, RawMessage, SuiMessageSource,
};
pub use error::{CoreError, Result};
pub use feed::{Feed, FeedEntry, FeedSnapshot, FeedSort, LoadOutcome, StatusReason};
pub use wallet::{SwapForm, WalletApiError, WalletClient};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        CoreError, Feed, FeedEntry, FeedSnapshot, FeedSort, MessageSource, MessageStatus,
        PageCursor, RawMessage, Result, StatusReason, SuiworldConfig, SwapForm, WalletApiError,
        WalletClient,
    };
}

/// Shared HTTP client settings for the node and backend clients.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("suiworld/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(20))
        .connect_timeout(std::time::Duration::from_secs(5))
        .build()
        // builder only fails when the TLS backend cannot initialize
        .unwrap_or_else(|_| reqwest::Client::new())
}
