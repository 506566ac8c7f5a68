use crate::application_port::{GraphError, SocialGraphService};
use crate::domain_model::{FriendLinkId, FriendLinkRecord, FriendListKey, RequestSummary, UserId};
use crate::domain_port::{FriendLinkRepo, FriendListCache, LinkClaim, UserRepo, UserRecord};
use std::sync::Arc;

pub struct RealSocialGraphService {
    user_repo: Arc<dyn UserRepo>,
    friend_link_repo: Arc<dyn FriendLinkRepo>,
    friend_cache: Arc<dyn FriendListCache>,
    cache_ttl_secs: u64,
}

impl RealSocialGraphService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friend_link_repo: Arc<dyn FriendLinkRepo>,
        friend_cache: Arc<dyn FriendListCache>,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            user_repo,
            friend_link_repo,
            friend_cache,
            cache_ttl_secs,
        }
    }

    async fn resolve_name(&self, username: &str) -> Result<Option<UserRecord>, GraphError> {
        self.user_repo
            .resolve_by_name(username)
            .await
            .map_err(|e| GraphError::Store(format!("resolve username: {e}")))
    }
}

#[async_trait::async_trait]
impl SocialGraphService for RealSocialGraphService {
    async fn send_request(
        &self,
        sender: UserId,
        recipient_name: &str,
    ) -> Result<FriendLinkRecord, GraphError> {
        let recipient = self
            .resolve_name(recipient_name)
            .await?
            .ok_or(GraphError::NotFound)?;
        if recipient.user_id == sender {
            return Err(GraphError::SelfRequest);
        }

        // Any existing row between the pair blocks a new request, whatever
        // its direction or status.
        if self
            .friend_link_repo
            .find_between(sender, recipient.user_id)
            .await?
            .is_some()
        {
            return Err(GraphError::DuplicateRequest);
        }

        match self
            .friend_link_repo
            .insert_pending(sender, recipient.user_id)
            .await?
        {
            LinkClaim::Created(link) => Ok(link),
            LinkClaim::Existing => {
                // lost the race to a concurrent request for the same pair
                tracing::debug!(%sender, recipient = %recipient.user_id, "pair claim lost");
                Err(GraphError::DuplicateRequest)
            }
        }
    }

    async fn list_incoming_requests(
        &self,
        user: UserId,
    ) -> Result<Vec<RequestSummary>, GraphError> {
        let links = self.friend_link_repo.list_pending_to(user).await?;

        let mut requests = Vec::with_capacity(links.len());
        for link in links {
            let sender = self
                .user_repo
                .resolve_by_id(link.sender)
                .await
                .map_err(|e| GraphError::Store(format!("resolve sender: {e}")))?
                .ok_or_else(|| {
                    GraphError::Store(format!("dangling sender {} on link {}", link.sender, link.link_id))
                })?;
            requests.push(RequestSummary {
                link_id: link.link_id,
                sender: sender.user_id,
                sender_username: sender.username,
            });
        }

        Ok(requests)
    }

    async fn respond_to_request(
        &self,
        user: UserId,
        link_id: FriendLinkId,
        accept: bool,
    ) -> Result<(), GraphError> {
        let link = self
            .friend_link_repo
            .get(link_id)
            .await?
            .ok_or(GraphError::NotFound)?;
        if link.recipient != user {
            // only the addressee may act on a request
            return Err(GraphError::NotFound);
        }

        if accept {
            self.friend_link_repo.confirm(link_id).await?;
            tracing::info!(%link_id, recipient = %user, "friend request accepted");
        } else {
            self.friend_link_repo.delete(link_id).await?;
            tracing::info!(%link_id, recipient = %user, "friend request declined");
        }

        // No cache invalidation here: friend lists converge once the TTL
        // on the cached entry elapses.
        Ok(())
    }

    async fn list_confirmed_friends(
        &self,
        user: UserId,
        signature: &str,
    ) -> Result<Vec<UserRecord>, GraphError> {
        let key = FriendListKey::new(user, signature);

        if let Some(cached) = self
            .friend_cache
            .get(&key)
            .await
            .map_err(|e| GraphError::Store(format!("friend cache read: {e}")))?
        {
            tracing::trace!(%key, "friend list cache hit");
            return Ok(cached);
        }
        tracing::trace!(%key, "friend list cache miss");

        let links = self.friend_link_repo.list_confirmed_for(user).await?;
        let mut friends = Vec::with_capacity(links.len());
        for link in links {
            let other = link.other_party(user);
            let record = self
                .user_repo
                .resolve_by_id(other)
                .await
                .map_err(|e| GraphError::Store(format!("resolve friend: {e}")))?
                .ok_or_else(|| {
                    GraphError::Store(format!("dangling friend {} on link {}", other, link.link_id))
                })?;
            friends.push(record);
        }

        self.friend_cache
            .set(&key, &friends, self.cache_ttl_secs)
            .await
            .map_err(|e| GraphError::Store(format!("friend cache write: {e}")))?;

        Ok(friends)
    }
}
