//! Listing lifecycle operations.
//!
//! [`ListingService`] is the only caller of the [`DataStore`]: it compiles
//! search criteria, discards caller-chosen store fields, enforces seeding
//! idempotence and turns store outcomes into [`ServiceError`] kinds.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::models::{Listing, ListingPatch};
use crate::query::{self, CriteriaError, SearchParams};
use crate::seed;
use crate::store::{DataStore, StoreError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Property not found")]
    NotFound(String),

    #[error(transparent)]
    InvalidCriterion(#[from] CriteriaError),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// What a seeding request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was not empty; nothing was written
    AlreadySeeded(u64),
    /// The collection was empty and the demonstration set was inserted
    Seeded(u64),
}

impl SeedOutcome {
    pub fn count(self) -> u64 {
        match self {
            SeedOutcome::AlreadySeeded(count) | SeedOutcome::Seeded(count) => count,
        }
    }

    pub fn message(self) -> String {
        match self {
            SeedOutcome::AlreadySeeded(count) => {
                format!("Database already contains {count} properties")
            }
            SeedOutcome::Seeded(count) => format!("Successfully seeded {count} properties"),
        }
    }
}

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn DataStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Name of the backing store, for status reporting
    pub fn source_name(&self) -> &'static str {
        self.store.source_name()
    }

    pub async fn search(&self, params: &SearchParams) -> ServiceResult<Vec<Listing>> {
        let query = query::compile(params)?;
        let listings = self
            .store
            .find(&query.predicate, query.limit, query.sort)
            .await
            .map_err(storage_failure("search"))?;
        debug!(results = listings.len(), "listing search");
        Ok(listings)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Listing> {
        self.store
            .find_by_id(id)
            .await
            .map_err(storage_failure("get"))?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub async fn create(&self, listing: Listing) -> ServiceResult<Listing> {
        let stored = self
            .store
            .insert(listing.without_store_fields())
            .await
            .map_err(storage_failure("create"))?;
        info!(id = stored.id.as_deref().unwrap_or_default(), "created listing");
        Ok(stored)
    }

    pub async fn update(&self, id: &str, patch: &ListingPatch) -> ServiceResult<Listing> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let updated = self
            .store
            .update_by_id(id, patch)
            .await
            .map_err(storage_failure("update"))?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        info!(id, fields = patch.fields().len(), "updated listing");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let existed = self
            .store
            .delete_by_id(id)
            .await
            .map_err(storage_failure("delete"))?;
        if !existed {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        info!(id, "deleted listing");
        Ok(())
    }

    /// Insert the demonstration dataset if, and only if, the store is empty.
    ///
    /// The count and the insert are separate store calls; two concurrent
    /// seeds that both observe an empty store will both insert.
    pub async fn seed(&self) -> ServiceResult<SeedOutcome> {
        let existing = self
            .store
            .count()
            .await
            .map_err(storage_failure("seed"))?;
        if existing > 0 {
            info!(existing, "store already seeded");
            return Ok(SeedOutcome::AlreadySeeded(existing));
        }

        let inserted = self
            .store
            .insert_many(seed::demo_listings())
            .await
            .map_err(storage_failure("seed"))?;
        info!(inserted, "seeded demonstration listings");
        Ok(SeedOutcome::Seeded(inserted))
    }
}

fn storage_failure(operation: &'static str) -> impl Fn(StoreError) -> ServiceError {
    move |err| {
        error!(operation, error = %err, "store operation failed");
        ServiceError::Storage(err)
    }
}
