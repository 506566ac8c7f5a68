//! End-to-end scenario over the in-memory registry: request, accept,
//! message, drain.

use palaver::application_port::{GraphError, MessagingError};
use palaver::infra_mem::MemUserRepo;
use palaver::registry::ServiceRegistry;
use std::sync::Arc;
use std::time::Duration;

const TTL_SECS: u64 = 300;

#[tokio::test(start_paused = true)]
async fn alice_and_bob_become_friends_and_chat() {
    let users = Arc::new(MemUserRepo::new());
    let alice = users.add("alice");
    let bob = users.add("bob");
    let registry = ServiceRegistry::in_memory(users, TTL_SECS);

    // alice requests bob; the pending link is directed alice -> bob
    let link = registry
        .social_graph
        .send_request(alice.user_id, "bob")
        .await
        .unwrap();
    assert_eq!(link.sender, alice.user_id);
    assert_eq!(link.recipient, bob.user_id);
    assert!(!link.confirmed);

    // a second request in either direction is a duplicate
    assert!(matches!(
        registry.social_graph.send_request(alice.user_id, "bob").await,
        Err(GraphError::DuplicateRequest)
    ));
    assert!(matches!(
        registry.social_graph.send_request(bob.user_id, "alice").await,
        Err(GraphError::DuplicateRequest)
    ));

    // messaging stays gated until bob accepts
    assert!(matches!(
        registry
            .messaging
            .send_message(alice.user_id, "bob", "hi")
            .await,
        Err(MessagingError::NotFriends)
    ));

    // prime alice's cached friend list while it is still empty
    let primed = registry
        .social_graph
        .list_confirmed_friends(alice.user_id, "friends")
        .await
        .unwrap();
    assert!(primed.is_empty());

    let incoming = registry
        .social_graph
        .list_incoming_requests(bob.user_id)
        .await
        .unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].sender_username, "alice");
    registry
        .social_graph
        .respond_to_request(bob.user_id, incoming[0].link_id, true)
        .await
        .unwrap();

    // the cached list still lags the acceptance
    let stale = registry
        .social_graph
        .list_confirmed_friends(alice.user_id, "friends")
        .await
        .unwrap();
    assert!(stale.is_empty());

    // the acceptance authorizes messaging immediately
    let record = registry
        .messaging
        .send_message(alice.user_id, "bob", "hi")
        .await
        .unwrap();
    assert_eq!(record.sender, alice.user_id);
    assert_eq!(record.recipient, bob.user_id);
    assert_eq!(record.text, "hi");
    assert!(!record.read);

    let delivered = registry
        .messaging
        .list_unread_and_mark_read(bob.user_id)
        .await
        .unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].sender_username, "alice");
    assert_eq!(delivered[0].text, "hi");

    // the drain marked everything read
    let empty = registry
        .messaging
        .list_unread_and_mark_read(bob.user_id)
        .await
        .unwrap();
    assert!(empty.is_empty());

    // friend lists converge once the TTL passes
    tokio::time::advance(Duration::from_secs(TTL_SECS + 1)).await;
    let friends = registry
        .social_graph
        .list_confirmed_friends(alice.user_id, "friends")
        .await
        .unwrap();
    assert_eq!(friends, vec![bob]);
}
