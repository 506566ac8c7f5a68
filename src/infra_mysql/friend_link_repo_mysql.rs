use super::util::is_dup_key;
use crate::application_port::GraphError;
use crate::domain_model::{FriendLinkId, FriendLinkRecord, UserId, UserPair};
use crate::domain_port::{FriendLinkRepo, LinkClaim};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Expected schema:
///
/// ```sql
/// CREATE TABLE friend_link (
///     link_id    BIGINT PRIMARY KEY AUTO_INCREMENT,
///     sender     BIGINT NOT NULL,
///     recipient  BIGINT NOT NULL,
///     confirmed  TINYINT(1) NOT NULL DEFAULT 0,
///     user_min   BIGINT NOT NULL,
///     user_max   BIGINT NOT NULL,
///     created_at TIMESTAMP NOT NULL,
///     UNIQUE KEY uq_friend_pair (user_min, user_max)
/// );
/// ```
///
/// `uq_friend_pair` is what serializes concurrent requests for one pair:
/// the loser's insert fails with ER_DUP_ENTRY and surfaces as
/// `LinkClaim::Existing`.
pub struct MySqlFriendLinkRepo {
    pool: MySqlPool,
}

impl MySqlFriendLinkRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlFriendLinkRepo { pool }
    }
}

fn record_from(row: MySqlRow) -> Result<FriendLinkRecord, GraphError> {
    let decode = |e: sqlx::Error| GraphError::Store(format!("decode friend link: {e}"));
    Ok(FriendLinkRecord {
        link_id: row.try_get::<FriendLinkId, _>("link_id").map_err(decode)?,
        sender: row.try_get::<UserId, _>("sender").map_err(decode)?,
        recipient: row.try_get::<UserId, _>("recipient").map_err(decode)?,
        confirmed: row.try_get::<bool, _>("confirmed").map_err(decode)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(decode)?,
    })
}

#[async_trait::async_trait]
impl FriendLinkRepo for MySqlFriendLinkRepo {
    async fn insert_pending(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<LinkClaim, GraphError> {
        let pair = UserPair::new(sender, recipient);
        let created_at = Utc::now();

        let res = sqlx::query(
            r#"
INSERT INTO friend_link (sender, recipient, confirmed, user_min, user_max, created_at)
VALUES (?, ?, 0, ?, ?, ?)
"#,
        )
        .bind(sender)
        .bind(recipient)
        .bind(pair.min())
        .bind(pair.max())
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match res {
            Ok(done) => Ok(LinkClaim::Created(FriendLinkRecord {
                link_id: FriendLinkId(done.last_insert_id() as i64),
                sender,
                recipient,
                confirmed: false,
                created_at,
            })),
            Err(e) if is_dup_key(&e) => Ok(LinkClaim::Existing),
            Err(e) => Err(GraphError::Store(format!("insert friend link: {e}"))),
        }
    }

    async fn get(&self, link_id: FriendLinkId) -> Result<Option<FriendLinkRecord>, GraphError> {
        let row = sqlx::query(
            "SELECT link_id, sender, recipient, confirmed, created_at FROM friend_link WHERE link_id = ?",
        )
        .bind(link_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GraphError::Store(format!("select friend link: {e}")))?;

        row.map(record_from).transpose()
    }

    async fn find_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<FriendLinkRecord>, GraphError> {
        let pair = UserPair::new(a, b);

        let row = sqlx::query(
            r#"
SELECT link_id, sender, recipient, confirmed, created_at
FROM friend_link
WHERE user_min = ? AND user_max = ?
"#,
        )
        .bind(pair.min())
        .bind(pair.max())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GraphError::Store(format!("select pair link: {e}")))?;

        row.map(record_from).transpose()
    }

    async fn confirmed_between(&self, a: UserId, b: UserId) -> Result<bool, GraphError> {
        let pair = UserPair::new(a, b);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM friend_link WHERE user_min = ? AND user_max = ? AND confirmed = 1",
        )
        .bind(pair.min())
        .bind(pair.max())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GraphError::Store(format!("count confirmed pair: {e}")))?;

        Ok(count > 0)
    }

    async fn list_pending_to(
        &self,
        recipient: UserId,
    ) -> Result<Vec<FriendLinkRecord>, GraphError> {
        let rows = sqlx::query(
            r#"
SELECT link_id, sender, recipient, confirmed, created_at
FROM friend_link
WHERE recipient = ? AND confirmed = 0
ORDER BY link_id ASC
"#,
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GraphError::Store(format!("list pending links: {e}")))?;

        rows.into_iter().map(record_from).collect()
    }

    async fn list_confirmed_for(
        &self,
        user: UserId,
    ) -> Result<Vec<FriendLinkRecord>, GraphError> {
        // sender-side links first, then recipient-side, each by id
        let rows = sqlx::query(
            r#"
SELECT link_id, sender, recipient, confirmed, created_at
FROM friend_link
WHERE confirmed = 1 AND (sender = ? OR recipient = ?)
ORDER BY (sender = ?) DESC, link_id ASC
"#,
        )
        .bind(user)
        .bind(user)
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GraphError::Store(format!("list confirmed links: {e}")))?;

        rows.into_iter().map(record_from).collect()
    }

    async fn confirm(&self, link_id: FriendLinkId) -> Result<(), GraphError> {
        // Zero affected rows covers both "already confirmed" and "row just
        // deleted"; either is the accepted no-op outcome of a lost race.
        sqlx::query("UPDATE friend_link SET confirmed = 1 WHERE link_id = ?")
            .bind(link_id)
            .execute(&self.pool)
            .await
            .map_err(|e| GraphError::Store(format!("confirm friend link: {e}")))?;

        Ok(())
    }

    async fn delete(&self, link_id: FriendLinkId) -> Result<(), GraphError> {
        sqlx::query("DELETE FROM friend_link WHERE link_id = ?")
            .bind(link_id)
            .execute(&self.pool)
            .await
            .map_err(|e| GraphError::Store(format!("delete friend link: {e}")))?;

        Ok(())
    }
}
