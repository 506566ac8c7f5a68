use crate::application_port::{MessagingError, MessagingService};
use crate::domain_model::{InboxMessage, MessageRecord, UserId};
use crate::domain_port::{FriendLinkRepo, MessageRepo, UserRepo};
use std::sync::Arc;

pub struct RealMessagingService {
    user_repo: Arc<dyn UserRepo>,
    friend_link_repo: Arc<dyn FriendLinkRepo>,
    message_repo: Arc<dyn MessageRepo>,
}

impl RealMessagingService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friend_link_repo: Arc<dyn FriendLinkRepo>,
        message_repo: Arc<dyn MessageRepo>,
    ) -> Self {
        Self {
            user_repo,
            friend_link_repo,
            message_repo,
        }
    }

    /// Authorization gate. Reads the persisted link state directly rather
    /// than the friend-list cache: the gate must not tolerate the
    /// staleness that listing accepts.
    async fn is_friend(&self, a: UserId, b: UserId) -> Result<bool, MessagingError> {
        self.friend_link_repo
            .confirmed_between(a, b)
            .await
            .map_err(|e| MessagingError::Store(format!("friendship check: {e}")))
    }
}

#[async_trait::async_trait]
impl MessagingService for RealMessagingService {
    async fn send_message(
        &self,
        sender: UserId,
        recipient_name: &str,
        text: &str,
    ) -> Result<MessageRecord, MessagingError> {
        let recipient = self
            .user_repo
            .resolve_by_name(recipient_name)
            .await
            .map_err(|e| MessagingError::Store(format!("resolve recipient: {e}")))?
            .ok_or(MessagingError::NotFound)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }

        if !self.is_friend(sender, recipient.user_id).await? {
            return Err(MessagingError::NotFriends);
        }

        let record = self
            .message_repo
            .insert(sender, recipient.user_id, text)
            .await?;
        tracing::debug!(message_id = %record.message_id, %sender, recipient = %recipient.user_id, "message delivered");

        Ok(record)
    }

    async fn list_unread_and_mark_read(
        &self,
        user: UserId,
    ) -> Result<Vec<InboxMessage>, MessagingError> {
        let unread = self.message_repo.list_unread_to(user).await?;

        let mut delivered = Vec::with_capacity(unread.len());
        for message in unread {
            let sender = self
                .user_repo
                .resolve_by_id(message.sender)
                .await
                .map_err(|e| MessagingError::Store(format!("resolve sender: {e}")))?
                .ok_or_else(|| {
                    MessagingError::Store(format!(
                        "dangling sender {} on message {}",
                        message.sender, message.message_id
                    ))
                })?;

            // Mark before handing the row out. A failure from here on
            // leaves earlier rows read-but-undelivered, which is the
            // accepted at-least-once trade-off.
            self.message_repo.mark_read(message.message_id).await?;
            delivered.push(InboxMessage {
                sender_username: sender.username,
                text: message.text,
            });
        }

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::RealSocialGraphService;
    use crate::application_port::SocialGraphService;
    use crate::infra_mem::{MemFriendLinkRepo, MemFriendListCache, MemMessageRepo, MemUserRepo};

    struct Fixture {
        users: Arc<MemUserRepo>,
        graph: RealSocialGraphService,
        messaging: RealMessagingService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemUserRepo::new());
        let links = Arc::new(MemFriendLinkRepo::new());
        let graph = RealSocialGraphService::new(
            users.clone(),
            links.clone(),
            Arc::new(MemFriendListCache::new()),
            300,
        );
        let messaging =
            RealMessagingService::new(users.clone(), links, Arc::new(MemMessageRepo::new()));
        Fixture {
            users,
            graph,
            messaging,
        }
    }

    async fn befriend(fx: &Fixture, a: UserId, b_name: &str, b: UserId) {
        let link = fx.graph.send_request(a, b_name).await.unwrap();
        fx.graph.respond_to_request(b, link.link_id, true).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_recipient_is_not_found() {
        let fx = fixture();
        let alice = fx.users.add("alice");

        let err = fx.messaging.send_message(alice.user_id, "nobody", "hi").await;
        assert!(matches!(err, Err(MessagingError::NotFound)));
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");
        befriend(&fx, alice.user_id, "bob", bob.user_id).await;

        let err = fx.messaging.send_message(alice.user_id, "bob", "").await;
        assert!(matches!(err, Err(MessagingError::EmptyMessage)));
        let err = fx.messaging.send_message(alice.user_id, "bob", "  \n\t ").await;
        assert!(matches!(err, Err(MessagingError::EmptyMessage)));
    }

    #[tokio::test]
    async fn messaging_a_non_friend_is_gated() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        fx.users.add("bob");

        let err = fx.messaging.send_message(alice.user_id, "bob", "hi").await;
        assert!(matches!(err, Err(MessagingError::NotFriends)));
    }

    #[tokio::test]
    async fn a_pending_request_does_not_authorize_messaging() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        fx.users.add("bob");

        fx.graph.send_request(alice.user_id, "bob").await.unwrap();

        let err = fx.messaging.send_message(alice.user_id, "bob", "hi").await;
        assert!(matches!(err, Err(MessagingError::NotFriends)));
    }

    #[tokio::test]
    async fn either_side_of_a_confirmed_link_may_message() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");
        befriend(&fx, alice.user_id, "bob", bob.user_id).await;

        fx.messaging
            .send_message(alice.user_id, "bob", "hi bob")
            .await
            .unwrap();
        fx.messaging
            .send_message(bob.user_id, "alice", "hi alice")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn the_gate_sees_an_acceptance_immediately() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");

        // prime alice's cached friend list before the friendship exists
        let cached = fx
            .graph
            .list_confirmed_friends(alice.user_id, "friends")
            .await
            .unwrap();
        assert!(cached.is_empty());

        befriend(&fx, alice.user_id, "bob", bob.user_id).await;

        // the cached list is still stale and empty, but authorization
        // reads persisted state and lets the message through
        let stale = fx
            .graph
            .list_confirmed_friends(alice.user_id, "friends")
            .await
            .unwrap();
        assert!(stale.is_empty());
        fx.messaging
            .send_message(alice.user_id, "bob", "hi")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unread_listing_drains_the_inbox() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");
        befriend(&fx, alice.user_id, "bob", bob.user_id).await;

        fx.messaging
            .send_message(alice.user_id, "bob", "first")
            .await
            .unwrap();
        fx.messaging
            .send_message(alice.user_id, "bob", "second")
            .await
            .unwrap();

        let batch = fx
            .messaging
            .list_unread_and_mark_read(bob.user_id)
            .await
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].sender_username, "alice");
        assert_eq!(batch[0].text, "first");
        assert_eq!(batch[1].text, "second");

        let drained = fx
            .messaging
            .list_unread_and_mark_read(bob.user_id)
            .await
            .unwrap();
        assert!(drained.is_empty());
    }

    #[tokio::test]
    async fn reading_does_not_touch_the_senders_inbox() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");
        befriend(&fx, alice.user_id, "bob", bob.user_id).await;

        fx.messaging
            .send_message(alice.user_id, "bob", "for bob")
            .await
            .unwrap();
        fx.messaging
            .send_message(bob.user_id, "alice", "for alice")
            .await
            .unwrap();

        let bobs = fx
            .messaging
            .list_unread_and_mark_read(bob.user_id)
            .await
            .unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].text, "for bob");

        let alices = fx
            .messaging
            .list_unread_and_mark_read(alice.user_id)
            .await
            .unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].text, "for alice");
    }

    #[tokio::test]
    async fn message_text_is_stored_trimmed() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");
        befriend(&fx, alice.user_id, "bob", bob.user_id).await;

        let record = fx
            .messaging
            .send_message(alice.user_id, "bob", "  hi \n")
            .await
            .unwrap();
        assert_eq!(record.text, "hi");
        assert!(!record.read);
    }

    #[tokio::test]
    async fn a_declined_pair_stays_gated() {
        let fx = fixture();
        let alice = fx.users.add("alice");
        let bob = fx.users.add("bob");

        let link = fx.graph.send_request(alice.user_id, "bob").await.unwrap();
        fx.graph
            .respond_to_request(bob.user_id, link.link_id, false)
            .await
            .unwrap();

        let err = fx.messaging.send_message(alice.user_id, "bob", "hi").await;
        assert!(matches!(err, Err(MessagingError::NotFriends)));
        // and the graph agrees the pair is free again
        fx.graph.send_request(alice.user_id, "bob").await.unwrap();
    }
}
