use crate::domain_model::FriendListKey;
use crate::domain_port::{CacheError, FriendListCache, UserRecord};
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

struct CacheSlot {
    expires_at: Instant,
    friends: Vec<UserRecord>,
}

/// TTL cache over the tokio clock, so tests can cross the expiry boundary
/// with a paused runtime. Expired entries are dropped lazily on read.
pub struct MemFriendListCache {
    entries: DashMap<String, CacheSlot>,
}

impl MemFriendListCache {
    pub fn new() -> Self {
        MemFriendListCache {
            entries: DashMap::new(),
        }
    }
}

impl Default for MemFriendListCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FriendListCache for MemFriendListCache {
    async fn get(&self, key: &FriendListKey) -> Result<Option<Vec<UserRecord>>, CacheError> {
        let key = key.to_string();
        if let Some(slot) = self.entries.get(&key) {
            if Instant::now() < slot.expires_at {
                return Ok(Some(slot.friends.clone()));
            }
        }
        self.entries
            .remove_if(&key, |_, slot| Instant::now() >= slot.expires_at);
        Ok(None)
    }

    async fn set(
        &self,
        key: &FriendListKey,
        friends: &[UserRecord],
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            CacheSlot {
                expires_at: Instant::now() + Duration::from_secs(ttl_secs),
                friends: friends.to_vec(),
            },
        );
        Ok(())
    }
}
