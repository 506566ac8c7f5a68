use crate::application_port::GraphError;
use crate::domain_model::{FriendLinkId, FriendLinkRecord, UserId, UserPair};
use crate::domain_port::{FriendLinkRepo, LinkClaim};
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MemFriendLinkRepo {
    links: DashMap<FriendLinkId, FriendLinkRecord>,
    // canonical (min, max) pair -> row; the entry API stands in for the
    // storage-level pair uniqueness constraint
    pairs: DashMap<(UserId, UserId), FriendLinkId>,
    next_id: AtomicI64,
}

impl MemFriendLinkRepo {
    pub fn new() -> Self {
        MemFriendLinkRepo {
            links: DashMap::new(),
            pairs: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn pair_key(a: UserId, b: UserId) -> (UserId, UserId) {
        let pair = UserPair::new(a, b);
        (pair.min(), pair.max())
    }
}

impl Default for MemFriendLinkRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FriendLinkRepo for MemFriendLinkRepo {
    async fn insert_pending(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<LinkClaim, GraphError> {
        match self.pairs.entry(Self::pair_key(sender, recipient)) {
            Entry::Occupied(_) => Ok(LinkClaim::Existing),
            Entry::Vacant(slot) => {
                let link_id = FriendLinkId(self.next_id.fetch_add(1, Ordering::Relaxed));
                let record = FriendLinkRecord {
                    link_id,
                    sender,
                    recipient,
                    confirmed: false,
                    created_at: Utc::now(),
                };
                self.links.insert(link_id, record.clone());
                slot.insert(link_id);
                Ok(LinkClaim::Created(record))
            }
        }
    }

    async fn get(&self, link_id: FriendLinkId) -> Result<Option<FriendLinkRecord>, GraphError> {
        Ok(self.links.get(&link_id).map(|r| r.value().clone()))
    }

    async fn find_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<FriendLinkRecord>, GraphError> {
        let Some(link_id) = self.pairs.get(&Self::pair_key(a, b)).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.links.get(&link_id).map(|r| r.value().clone()))
    }

    async fn confirmed_between(&self, a: UserId, b: UserId) -> Result<bool, GraphError> {
        Ok(self
            .find_between(a, b)
            .await?
            .is_some_and(|link| link.confirmed))
    }

    async fn list_pending_to(
        &self,
        recipient: UserId,
    ) -> Result<Vec<FriendLinkRecord>, GraphError> {
        let mut pending: Vec<FriendLinkRecord> = self
            .links
            .iter()
            .filter(|entry| entry.recipient == recipient && !entry.confirmed)
            .map(|entry| entry.value().clone())
            .collect();
        pending.sort_by_key(|link| link.link_id);
        Ok(pending)
    }

    async fn list_confirmed_for(
        &self,
        user: UserId,
    ) -> Result<Vec<FriendLinkRecord>, GraphError> {
        let mut confirmed: Vec<FriendLinkRecord> = self
            .links
            .iter()
            .filter(|entry| {
                entry.confirmed && (entry.sender == user || entry.recipient == user)
            })
            .map(|entry| entry.value().clone())
            .collect();
        // sender-side links first, then recipient-side, each by id
        confirmed.sort_by_key(|link| (link.sender != user, link.link_id));
        Ok(confirmed)
    }

    async fn confirm(&self, link_id: FriendLinkId) -> Result<(), GraphError> {
        match self.links.get_mut(&link_id) {
            Some(mut link) => {
                link.confirmed = true;
                Ok(())
            }
            None => Err(GraphError::NotFound),
        }
    }

    async fn delete(&self, link_id: FriendLinkId) -> Result<(), GraphError> {
        let Some((_, link)) = self.links.remove(&link_id) else {
            return Err(GraphError::NotFound);
        };
        self.pairs
            .remove(&Self::pair_key(link.sender, link.recipient));
        Ok(())
    }
}
