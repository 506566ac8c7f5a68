use crate::application_port::MessagingError;
use crate::domain_model::{MessageId, MessageRecord, UserId};
use crate::domain_port::MessageRepo;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MemMessageRepo {
    messages: DashMap<MessageId, MessageRecord>,
    next_id: AtomicI64,
}

impl MemMessageRepo {
    pub fn new() -> Self {
        MemMessageRepo {
            messages: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemMessageRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MessageRepo for MemMessageRepo {
    async fn insert(
        &self,
        sender: UserId,
        recipient: UserId,
        text: &str,
    ) -> Result<MessageRecord, MessagingError> {
        let message_id = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = MessageRecord {
            message_id,
            sender,
            recipient,
            text: text.to_string(),
            read: false,
            created_at: Utc::now(),
        };
        self.messages.insert(message_id, record.clone());
        Ok(record)
    }

    async fn list_unread_to(
        &self,
        recipient: UserId,
    ) -> Result<Vec<MessageRecord>, MessagingError> {
        let mut unread: Vec<MessageRecord> = self
            .messages
            .iter()
            .filter(|entry| entry.recipient == recipient && !entry.read)
            .map(|entry| entry.value().clone())
            .collect();
        unread.sort_by_key(|message| message.message_id);
        Ok(unread)
    }

    async fn mark_read(&self, message_id: MessageId) -> Result<(), MessagingError> {
        if let Some(mut message) = self.messages.get_mut(&message_id) {
            message.read = true;
        }
        Ok(())
    }
}
