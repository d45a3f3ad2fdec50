//! User-facing save notifications.
//!
//! The engine reports save results two ways at once: the current notice is
//! part of the published state snapshot (and auto-clears after the configured
//! display duration), and every notice is also pushed to a
//! [`NotificationSink`] so hosts can surface toasts without diffing
//! snapshots. Sinks are fire-and-forget; the engine never waits on one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Message shown after a successful save.
pub const SAVED_MESSAGE: &str = "Subject order saved.";

/// Message shown after a failed save.
pub const SAVE_FAILED_MESSAGE: &str = "The new order could not be saved. Please try again.";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient user-facing message about a save attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: DateTime<Utc>,
}

impl Notice {
    /// Creates a success notice with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
            posted_at: Utc::now(),
        }
    }

    /// Creates an error notice with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
            posted_at: Utc::now(),
        }
    }

    /// The standard notice for an accepted save.
    pub fn saved() -> Self {
        Notice::success(SAVED_MESSAGE)
    }

    /// The standard notice for a failed save.
    pub fn save_failed() -> Self {
        Notice::error(SAVE_FAILED_MESSAGE)
    }

    /// Returns true for error notices.
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Receives notices emitted by the engine.
///
/// Implementations must not block: the engine calls `notify` from its event
/// loop and does not await an acknowledgement.
pub trait NotificationSink {
    fn notify(&self, notice: &Notice);
}

/// Default sink that writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => info!(message = %notice.message, "save notice"),
            NoticeKind::Error => warn!(message = %notice.message, "save notice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_notice_is_success() {
        let notice = Notice::saved();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(!notice.is_error());
        assert_eq!(notice.message, SAVED_MESSAGE);
    }

    #[test]
    fn failure_notice_tells_the_user_to_try_again() {
        let notice = Notice::save_failed();
        assert!(notice.is_error());
        assert!(notice.message.to_lowercase().contains("try again"));
    }

    #[test]
    fn serde_roundtrip_preserves_kind_and_message() {
        let notice = Notice::error("boom");
        let json = serde_json::to_string(&notice).unwrap();
        let parsed: Notice = serde_json::from_str(&json).unwrap();
        assert_eq!(notice, parsed);
    }
}
