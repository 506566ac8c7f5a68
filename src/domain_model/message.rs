use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct MessageId(pub i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directed text message. Immutable after creation except `read`,
/// which flips false -> true the first time the recipient drains their
/// unread inbox.
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub message_id: MessageId,
    pub sender: UserId,
    pub recipient: UserId,
    pub text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A delivered message as handed to the recipient.
#[derive(Debug, Clone, Serialize)]
pub struct InboxMessage {
    pub sender_username: String,
    pub text: String,
}
