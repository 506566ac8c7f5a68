use crate::domain_model::UserId;
use std::fmt;

/// Cache key for memoized friend-list reads.
///
/// One entry per (user, request signature); the signature distinguishes
/// logical queries sharing the namespace. Entries are only ever dropped by
/// TTL expiry, so a cached list may lag the persisted state by up to the
/// configured TTL.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FriendListKey {
    user_id: UserId,
    signature: String,
}

impl FriendListKey {
    pub fn new(user_id: UserId, signature: &str) -> Self {
        FriendListKey {
            user_id,
            signature: signature.to_string(),
        }
    }
}

impl fmt::Display for FriendListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.user_id, self.signature)
    }
}
