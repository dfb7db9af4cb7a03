//! Threshold promotion of normal messages.

use crate::data_source::{MessageStatus, RawMessage};

use super::types::{FeedEntry, StatusReason};

/// Likes at which a normal message goes under review
pub const LIKES_THRESHOLD: u64 = 20;
/// Alerts at which a normal message goes under review
pub const ALERTS_THRESHOLD: u64 = 20;

/// Status fields derived for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStatus {
    pub displayed_status: MessageStatus,
    pub status_reason: Option<StatusReason>,
    pub likes_to_threshold: Option<u64>,
    pub alerts_to_threshold: Option<u64>,
}

/// Compute the displayed status of a message.
///
/// Statuses other than `NORMAL` were assigned on chain and pass through with
/// no distances. A normal message reaching either threshold is shown as under
/// review; the likes threshold is checked first and wins when both are met.
pub fn derive_status(message: &RawMessage) -> DerivedStatus {
    if message.status != MessageStatus::Normal {
        return DerivedStatus {
            displayed_status: message.status,
            status_reason: None,
            likes_to_threshold: None,
            alerts_to_threshold: None,
        };
    }

    let likes_left = LIKES_THRESHOLD.saturating_sub(message.likes);
    let alerts_left = ALERTS_THRESHOLD.saturating_sub(message.alerts);

    let (displayed_status, status_reason) = if message.likes >= LIKES_THRESHOLD {
        (MessageStatus::UnderReview, Some(StatusReason::LikesThreshold))
    } else if message.alerts >= ALERTS_THRESHOLD {
        (MessageStatus::UnderReview, Some(StatusReason::AlertsThreshold))
    } else {
        (MessageStatus::Normal, None)
    };

    DerivedStatus {
        displayed_status,
        status_reason,
        likes_to_threshold: Some(likes_left),
        alerts_to_threshold: Some(alerts_left),
    }
}

impl From<RawMessage> for FeedEntry {
    fn from(message: RawMessage) -> Self {
        let derived = derive_status(&message);
        Self {
            message,
            displayed_status: derived.displayed_status,
            status_reason: derived.status_reason,
            likes_to_threshold: derived.likes_to_threshold,
            alerts_to_threshold: derived.alerts_to_threshold,
        }
    }
}
