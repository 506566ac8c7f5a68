use crate::domain_model::FriendListKey;
use crate::domain_port::UserRecord;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache error: {0}")]
    Store(String),
}

/// TTL-evicted memo of friend-list results. There is deliberately no
/// delete/invalidate operation: accepting or declining a request does not
/// touch the cache, so reads may lag persisted state by up to the TTL.
#[async_trait::async_trait]
pub trait FriendListCache: Send + Sync {
    async fn get(&self, key: &FriendListKey) -> Result<Option<Vec<UserRecord>>, CacheError>;

    async fn set(
        &self,
        key: &FriendListKey,
        friends: &[UserRecord],
        ttl_secs: u64,
    ) -> Result<(), CacheError>;
}
