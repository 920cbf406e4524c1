//! Contact message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MessageId;

/// A contact form submission.
///
/// This is both the domain record and the wire shape: the server serializes
/// it in API responses and the dashboard client deserializes it back.
/// Field names use camelCase on the wire (`isRead`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Store-assigned id, unique and stable for the row's lifetime.
    pub id: MessageId,
    /// Sender name.
    pub name: String,
    /// Sender email (normalized to lowercase on submission).
    pub email: String,
    /// Service category, defaults to "General" on submission.
    pub service: String,
    /// Message body.
    pub message: String,
    /// Submission time, store-assigned and immutable.
    pub timestamp: DateTime<Utc>,
    /// Whether an admin has marked the message as read.
    pub is_read: bool,
}
