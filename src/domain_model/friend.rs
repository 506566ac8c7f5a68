use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct FriendLinkId(pub i64);

impl fmt::Display for FriendLinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directed friend-request row. `confirmed = false` is a pending
/// request; the recipient's accept flips it to `true`, a decline deletes
/// the row. At most one row exists per unordered user pair.
#[derive(Debug, Clone)]
pub struct FriendLinkRecord {
    pub link_id: FriendLinkId,
    pub sender: UserId,
    pub recipient: UserId,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl FriendLinkRecord {
    /// The counterpart of `user` on this link.
    pub fn other_party(&self, user: UserId) -> UserId {
        if self.sender == user {
            self.recipient
        } else {
            self.sender
        }
    }
}

/// A pending request as shown to its recipient, sender identity resolved.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSummary {
    pub link_id: FriendLinkId,
    pub sender: UserId,
    pub sender_username: String,
}
