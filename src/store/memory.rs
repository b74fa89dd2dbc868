//! In-memory listing store.
//!
//! Backs the service when no MongoDB is configured, and isolates tests from
//! any external database. All data lives in a single vector behind a
//! reader-writer lock; the lock is never held across an `.await`.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{DataStore, StoreError, StoreResult};
use crate::models::{timestamp, Listing, ListingPatch};
use crate::query::{Predicate, SortDirection, SortKey, SortOrder};

/// Cloneable handle to an in-memory listing collection
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

struct MemoryData {
    listings: Vec<Listing>,
    is_healthy: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            is_healthy: true,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `listings`, assigning ids and
    /// creation times as an insert would.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let store = Self::new();
        {
            let mut data = store.data.write();
            data.listings = listings.into_iter().map(assign_store_fields).collect();
        }
        store
    }

    /// Set the health status for simulating an unreachable store.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn len(&self) -> usize {
        self.data.read().listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn assign_store_fields(listing: Listing) -> Listing {
    Listing {
        id: Some(Uuid::new_v4().to_string()),
        created_at: Some(timestamp::now()),
        ..listing
    }
}

fn ensure_healthy(data: &MemoryData) -> StoreResult<()> {
    if data.is_healthy {
        Ok(())
    } else {
        Err(StoreError::Unavailable(
            "in-memory store marked unhealthy".to_string(),
        ))
    }
}

fn has_id(listing: &Listing, id: &str) -> bool {
    listing.id.as_deref() == Some(id)
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn find(
        &self,
        predicate: &Predicate,
        limit: usize,
        sort: SortOrder,
    ) -> StoreResult<Vec<Listing>> {
        let data = self.data.read();
        ensure_healthy(&data)?;

        // Newest insertions first, so equal timestamps keep newest-first order.
        let mut matches: Vec<Listing> = data
            .listings
            .iter()
            .rev()
            .filter(|listing| predicate.matches(listing))
            .cloned()
            .collect();

        match (sort.key, sort.direction) {
            (SortKey::CreatedAt, SortDirection::Descending) => {
                matches.sort_by_key(|listing| Reverse(listing.created_at))
            }
        }
        matches.truncate(limit);

        debug!(matched = matches.len(), limit, "in-memory find");
        Ok(matches)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Listing>> {
        let data = self.data.read();
        ensure_healthy(&data)?;
        Ok(data.listings.iter().find(|l| has_id(l, id)).cloned())
    }

    async fn insert(&self, listing: Listing) -> StoreResult<Listing> {
        let mut data = self.data.write();
        ensure_healthy(&data)?;
        let stored = assign_store_fields(listing);
        data.listings.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_id(&self, id: &str, patch: &ListingPatch) -> StoreResult<Option<Listing>> {
        let mut data = self.data.write();
        ensure_healthy(&data)?;
        let Some(slot) = data.listings.iter_mut().find(|l| has_id(l, id)) else {
            return Ok(None);
        };
        let updated = patch.apply_to(slot)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let mut data = self.data.write();
        ensure_healthy(&data)?;
        let before = data.listings.len();
        data.listings.retain(|l| !has_id(l, id));
        Ok(data.listings.len() < before)
    }

    async fn count(&self) -> StoreResult<u64> {
        let data = self.data.read();
        ensure_healthy(&data)?;
        Ok(data.listings.len() as u64)
    }

    async fn insert_many(&self, listings: Vec<Listing>) -> StoreResult<u64> {
        let mut data = self.data.write();
        ensure_healthy(&data)?;
        let inserted = listings.len() as u64;
        data.listings
            .extend(listings.into_iter().map(assign_store_fields));
        Ok(inserted)
    }

    fn source_name(&self) -> &'static str {
        "in-memory"
    }
}
