use crate::domain_model::FriendListKey;
use crate::domain_port::{CacheError, FriendListCache, UserRecord};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// Friend lists as JSON blobs under `{prefix}:{user_id}|{signature}`,
/// expired by Redis itself (`SET ... EX`). Nothing ever deletes an entry
/// early; the TTL is the staleness bound.
pub struct RedisFriendCache {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisFriendCache {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisFriendCache {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &FriendListKey) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait::async_trait]
impl FriendListCache for RedisFriendCache {
    async fn get(&self, key: &FriendListKey) -> Result<Option<Vec<UserRecord>>, CacheError> {
        let key = self.key(key);
        let mut conn = self.conn.clone();

        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| CacheError::Store(e.to_string()))?;

        match payload {
            Some(json) => {
                let friends: Vec<UserRecord> = serde_json::from_str(&json)
                    .map_err(|e| CacheError::Store(format!("decode cached friend list: {e}")))?;
                Ok(Some(friends))
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &FriendListKey,
        friends: &[UserRecord],
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let key = self.key(key);
        let mut conn = self.conn.clone();

        let payload = serde_json::to_string(friends)
            .map_err(|e| CacheError::Store(format!("encode friend list: {e}")))?;
        let _: () = conn
            .set_ex(&key, payload, ttl_secs)
            .await
            .map_err(|e| CacheError::Store(e.to_string()))?;

        Ok(())
    }
}
