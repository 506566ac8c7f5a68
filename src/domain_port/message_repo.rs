use crate::application_port::MessagingError;
use crate::domain_model::{MessageId, MessageRecord, UserId};

#[async_trait::async_trait]
pub trait MessageRepo: Send + Sync {
    /// Insert a new unread message.
    async fn insert(
        &self,
        sender: UserId,
        recipient: UserId,
        text: &str,
    ) -> Result<MessageRecord, MessagingError>;

    /// Unread messages addressed to `recipient`, ascending by message id.
    async fn list_unread_to(
        &self,
        recipient: UserId,
    ) -> Result<Vec<MessageRecord>, MessagingError>;

    /// Flip one message to read. Idempotent on the storage side.
    async fn mark_read(&self, message_id: MessageId) -> Result<(), MessagingError>;
}
