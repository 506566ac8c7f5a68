use crate::domain_model::{InboxMessage, MessageRecord, UserId};

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("recipient not found")]
    NotFound,
    #[error("message text is empty")]
    EmptyMessage,
    #[error("recipient is not a confirmed friend")]
    NotFriends,
    #[error("store error: {0}")]
    Store(String),
}

/// Message lifecycle: the friendship authorization gate, delivery and
/// read-state tracking.
#[async_trait::async_trait]
pub trait MessagingService: Send + Sync {
    /// Deliver `text` from `sender` to the user named `recipient_name`.
    /// The pair must hold a confirmed friend link; the check reads
    /// persisted state directly and never the friend-list cache.
    async fn send_message(
        &self,
        sender: UserId,
        recipient_name: &str,
        text: &str,
    ) -> Result<MessageRecord, MessagingError>;

    /// Drain the unread inbox of `user`. Each message is marked read in
    /// storage before it is appended to the returned batch, so a failure
    /// partway through can leave messages marked read that the caller
    /// never saw (accepted at-least-once semantics).
    async fn list_unread_and_mark_read(
        &self,
        user: UserId,
    ) -> Result<Vec<InboxMessage>, MessagingError>;
}
