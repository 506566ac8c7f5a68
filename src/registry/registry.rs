use crate::application_impl::{RealMessagingService, RealSocialGraphService};
use crate::application_port::{MessagingService, SocialGraphService};
use crate::infra_mem::{MemFriendLinkRepo, MemFriendListCache, MemMessageRepo, MemUserRepo};
use crate::infra_mysql::{MySqlFriendLinkRepo, MySqlMessageRepo, MySqlUserRepo};
use crate::infra_redis::RedisFriendCache;
use crate::settings::Settings;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Composition root. Builds the engines against the backends named in the
/// settings: `"mem"` runs entirely in-process, `"mysql"` uses the MySQL
/// pool for persistence and Redis for the friend-list cache.
pub struct ServiceRegistry {
    pub social_graph: Arc<dyn SocialGraphService>,
    pub messaging: Arc<dyn MessagingService>,
}

impl ServiceRegistry {
    pub async fn try_from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let needs_mysql =
            settings.graph.backend == "mysql" || settings.messaging.backend == "mysql";
        let pool = if needs_mysql {
            Some(MySqlPool::connect(&settings.mysql.dsn).await?)
        } else {
            None
        };

        // shared in-memory stores, so both engines observe the same state
        // when running without live infrastructure
        let mem_users = Arc::new(MemUserRepo::new());
        let mem_links = Arc::new(MemFriendLinkRepo::new());

        let social_graph: Arc<dyn SocialGraphService> = match settings.graph.backend.as_str() {
            "mem" => Arc::new(RealSocialGraphService::new(
                mem_users.clone(),
                mem_links.clone(),
                Arc::new(MemFriendListCache::new()),
                settings.graph.friends_cache_ttl_secs,
            )),
            "mysql" => {
                let pool = pool
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("mysql pool not configured"))?;
                let redis_client = redis::Client::open(settings.redis.dsn.as_str())?;
                let redis_manager = redis_client.get_connection_manager().await?;
                Arc::new(RealSocialGraphService::new(
                    Arc::new(MySqlUserRepo::new(pool.clone())),
                    Arc::new(MySqlFriendLinkRepo::new(pool)),
                    Arc::new(RedisFriendCache::new(
                        redis_manager,
                        settings.redis.cache_prefix.clone(),
                    )),
                    settings.graph.friends_cache_ttl_secs,
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown graph backend: {}", other)),
        };

        let messaging: Arc<dyn MessagingService> = match settings.messaging.backend.as_str() {
            "mem" => Arc::new(RealMessagingService::new(
                mem_users.clone(),
                mem_links.clone(),
                Arc::new(MemMessageRepo::new()),
            )),
            "mysql" => {
                let pool = pool
                    .ok_or_else(|| anyhow::anyhow!("mysql pool not configured"))?;
                Arc::new(RealMessagingService::new(
                    Arc::new(MySqlUserRepo::new(pool.clone())),
                    Arc::new(MySqlFriendLinkRepo::new(pool.clone())),
                    Arc::new(MySqlMessageRepo::new(pool)),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown messaging backend: {}", other)),
        };

        Ok(ServiceRegistry {
            social_graph,
            messaging,
        })
    }

    /// In-memory registry over a caller-seeded identity store; the
    /// integration tests and the demo binary drive the engines through
    /// this.
    pub fn in_memory(users: Arc<MemUserRepo>, cache_ttl_secs: u64) -> Self {
        let links = Arc::new(MemFriendLinkRepo::new());
        ServiceRegistry {
            social_graph: Arc::new(RealSocialGraphService::new(
                users.clone(),
                links.clone(),
                Arc::new(MemFriendListCache::new()),
                cache_ttl_secs,
            )),
            messaging: Arc::new(RealMessagingService::new(
                users,
                links,
                Arc::new(MemMessageRepo::new()),
            )),
        }
    }
}
