use crate::domain_model::UserId;
use crate::domain_port::{IdentityError, UserRecord, UserRepo};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Seedable identity resolver. Identities are owned by the external
/// authentication collaborator in production; here `add` stands in for it.
pub struct MemUserRepo {
    users: DashMap<UserId, UserRecord>,
    by_name: DashMap<String, UserId>,
    next_id: AtomicI64,
}

impl MemUserRepo {
    pub fn new() -> Self {
        MemUserRepo {
            users: DashMap::new(),
            by_name: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn add(&self, username: &str) -> UserRecord {
        let user_id = UserId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = UserRecord {
            user_id,
            username: username.to_string(),
        };
        self.users.insert(user_id, record.clone());
        self.by_name.insert(username.to_string(), user_id);
        record
    }
}

impl Default for MemUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemUserRepo {
    async fn resolve_by_name(&self, username: &str) -> Result<Option<UserRecord>, IdentityError> {
        let Some(user_id) = self.by_name.get(username).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&user_id).map(|r| r.value().clone()))
    }

    async fn resolve_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, IdentityError> {
        Ok(self.users.get(&user_id).map(|r| r.value().clone()))
    }
}
