use crate::application_port::GraphError;
use crate::domain_model::{FriendLinkId, FriendLinkRecord, UserId};

/// Outcome of a pending-link insert. Two concurrent requests for the same
/// pair can both pass the duplicate pre-check; the pair constraint in the
/// backend decides the winner and the loser sees `Existing`.
pub enum LinkClaim {
    Created(FriendLinkRecord),
    Existing,
}

#[async_trait::async_trait]
pub trait FriendLinkRepo: Send + Sync {
    /// Insert a pending link. A pair-constraint conflict is reported as
    /// `LinkClaim::Existing`, not as an error.
    async fn insert_pending(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<LinkClaim, GraphError>;

    async fn get(&self, link_id: FriendLinkId) -> Result<Option<FriendLinkRecord>, GraphError>;

    /// The row for this pair in either direction and any status, if one
    /// exists.
    async fn find_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<FriendLinkRecord>, GraphError>;

    /// Whether a confirmed link exists between the two users, in either
    /// direction. Always answered from persisted state.
    async fn confirmed_between(&self, a: UserId, b: UserId) -> Result<bool, GraphError>;

    /// Pending links addressed to `recipient`, ascending by link id.
    async fn list_pending_to(
        &self,
        recipient: UserId,
    ) -> Result<Vec<FriendLinkRecord>, GraphError>;

    /// Confirmed links touching `user` in either direction. Links where
    /// `user` is the sender come first, each group ascending by link id.
    async fn list_confirmed_for(
        &self,
        user: UserId,
    ) -> Result<Vec<FriendLinkRecord>, GraphError>;

    async fn confirm(&self, link_id: FriendLinkId) -> Result<(), GraphError>;

    async fn delete(&self, link_id: FriendLinkId) -> Result<(), GraphError>;
}
