use crate::application_port::MessagingError;
use crate::domain_model::{MessageId, MessageRecord, UserId};
use crate::domain_port::MessageRepo;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Expected schema:
///
/// ```sql
/// CREATE TABLE message (
///     message_id   BIGINT PRIMARY KEY AUTO_INCREMENT,
///     sender       BIGINT NOT NULL,
///     recipient    BIGINT NOT NULL,
///     message_text TEXT NOT NULL,
///     status_check TINYINT(1) NOT NULL DEFAULT 0,
///     created_at   TIMESTAMP NOT NULL,
///     KEY idx_unread (recipient, status_check)
/// );
/// ```
pub struct MySqlMessageRepo {
    pool: MySqlPool,
}

impl MySqlMessageRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlMessageRepo { pool }
    }
}

fn record_from(row: MySqlRow) -> Result<MessageRecord, MessagingError> {
    let decode = |e: sqlx::Error| MessagingError::Store(format!("decode message: {e}"));
    Ok(MessageRecord {
        message_id: row.try_get::<MessageId, _>("message_id").map_err(decode)?,
        sender: row.try_get::<UserId, _>("sender").map_err(decode)?,
        recipient: row.try_get::<UserId, _>("recipient").map_err(decode)?,
        text: row.try_get::<String, _>("message_text").map_err(decode)?,
        read: row.try_get::<bool, _>("status_check").map_err(decode)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(decode)?,
    })
}

#[async_trait::async_trait]
impl MessageRepo for MySqlMessageRepo {
    async fn insert(
        &self,
        sender: UserId,
        recipient: UserId,
        text: &str,
    ) -> Result<MessageRecord, MessagingError> {
        let created_at = Utc::now();

        let done = sqlx::query(
            r#"
INSERT INTO message (sender, recipient, message_text, status_check, created_at)
VALUES (?, ?, ?, 0, ?)
"#,
        )
        .bind(sender)
        .bind(recipient)
        .bind(text)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| MessagingError::Store(format!("insert message: {e}")))?;

        Ok(MessageRecord {
            message_id: MessageId(done.last_insert_id() as i64),
            sender,
            recipient,
            text: text.to_string(),
            read: false,
            created_at,
        })
    }

    async fn list_unread_to(
        &self,
        recipient: UserId,
    ) -> Result<Vec<MessageRecord>, MessagingError> {
        let rows = sqlx::query(
            r#"
SELECT message_id, sender, recipient, message_text, status_check, created_at
FROM message
WHERE recipient = ? AND status_check = 0
ORDER BY message_id ASC
"#,
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessagingError::Store(format!("list unread messages: {e}")))?;

        rows.into_iter().map(record_from).collect()
    }

    async fn mark_read(&self, message_id: MessageId) -> Result<(), MessagingError> {
        sqlx::query("UPDATE message SET status_check = 1 WHERE message_id = ?")
            .bind(message_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MessagingError::Store(format!("mark message read: {e}")))?;

        Ok(())
    }
}
