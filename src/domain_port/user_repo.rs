use crate::domain_model::UserId;
use serde::{Deserialize, Serialize};

/// A resolved identity. Authentication happens outside the core; callers
/// hand the engines an already-verified `UserId` and this resolver only
/// maps between ids and display names.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    async fn resolve_by_name(&self, username: &str) -> Result<Option<UserRecord>, IdentityError>;

    async fn resolve_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, IdentityError>;
}
