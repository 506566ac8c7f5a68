//! Walks the full friendship and messaging flow against the in-memory
//! backends; no MySQL or Redis required.
//!
//! ```text
//! cargo run --bin engine_demo -- --settings=settings/dev.toml
//! ```

use palaver::application_port::{GraphError, MessagingError};
use palaver::infra_mem::MemUserRepo;
use palaver::logger::*;
use palaver::registry::ServiceRegistry;
use palaver::settings::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    let filter = cli
        .log_filter
        .unwrap_or_else(|| project_settings.log.filter.clone());
    logger.reload_from_config(&LogConfig { filter })?;
    info!(?project_settings);

    let users = Arc::new(MemUserRepo::new());
    let alice = users.add("alice");
    let bob = users.add("bob");
    info!(?alice, ?bob, "seeded identities");

    let registry =
        ServiceRegistry::in_memory(users, project_settings.graph.friends_cache_ttl_secs);
    let graph = registry.social_graph;
    let messaging = registry.messaging;

    // alice asks, bob has not answered yet: messaging stays gated
    let link = graph.send_request(alice.user_id, "bob").await?;
    info!(link_id = %link.link_id, "alice -> bob request pending");
    match graph.send_request(bob.user_id, "alice").await {
        Err(GraphError::DuplicateRequest) => info!("reverse request rejected as duplicate"),
        other => warn!(?other, "unexpected outcome for reverse request"),
    }
    match messaging.send_message(alice.user_id, "bob", "hi bob").await {
        Err(MessagingError::NotFriends) => info!("message gated while request is pending"),
        other => warn!(?other, "unexpected outcome for gated message"),
    }

    // bob accepts; the pair may message both ways
    let incoming = graph.list_incoming_requests(bob.user_id).await?;
    info!(?incoming, "bob's inbox of requests");
    graph
        .respond_to_request(bob.user_id, incoming[0].link_id, true)
        .await?;

    messaging.send_message(alice.user_id, "bob", "hi bob").await?;
    messaging
        .send_message(bob.user_id, "alice", "hi alice")
        .await?;

    let delivered = messaging.list_unread_and_mark_read(bob.user_id).await?;
    info!(?delivered, "bob drained his inbox");
    let drained = messaging.list_unread_and_mark_read(bob.user_id).await?;
    info!(count = drained.len(), "second drain is empty");

    // friend lists converge once the cache entry expires; the first read
    // primes the cache
    let friends = graph
        .list_confirmed_friends(alice.user_id, "demo")
        .await?;
    info!(?friends, "alice's confirmed friends");

    Ok(())
}
