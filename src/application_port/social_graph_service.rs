use crate::domain_model::{FriendLinkId, FriendLinkRecord, RequestSummary, UserId};
use crate::domain_port::UserRecord;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Unknown user, or a request row that is absent or not addressed to
    /// the caller.
    #[error("not found")]
    NotFound,
    #[error("cannot send a friend request to yourself")]
    SelfRequest,
    #[error("friend request or friendship already exists")]
    DuplicateRequest,
    #[error("store error: {0}")]
    Store(String),
}

/// Friend-link lifecycle: request creation, duplicate detection,
/// accept/decline transitions and confirmed-friend enumeration.
#[async_trait::async_trait]
pub trait SocialGraphService: Send + Sync {
    /// Create a pending link from `sender` to the user named
    /// `recipient_name`. Rejected when the name does not resolve, the
    /// target is the caller, or a link already exists between the pair in
    /// either direction and any status.
    async fn send_request(
        &self,
        sender: UserId,
        recipient_name: &str,
    ) -> Result<FriendLinkRecord, GraphError>;

    /// Pending requests addressed to `user`, sender identities resolved,
    /// stable order (ascending link id).
    async fn list_incoming_requests(
        &self,
        user: UserId,
    ) -> Result<Vec<RequestSummary>, GraphError>;

    /// Accept or decline a request addressed to `user`. Only the
    /// recipient may act on a request; anyone else observes `NotFound`,
    /// same as for a missing row.
    async fn respond_to_request(
        &self,
        user: UserId,
        link_id: FriendLinkId,
        accept: bool,
    ) -> Result<(), GraphError>;

    /// Confirmed friends of `user`, read through the TTL cache under
    /// (`user`, `signature`). Results may lag an accept/decline by up to
    /// the cache TTL.
    async fn list_confirmed_friends(
        &self,
        user: UserId,
        signature: &str,
    ) -> Result<Vec<UserRecord>, GraphError>;
}
