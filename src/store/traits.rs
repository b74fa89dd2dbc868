use crate::models::{Listing, ListingPatch};
use crate::query::{Predicate, SortOrder};
use async_trait::async_trait;

use super::StoreResult;

/// Persistence capability for listings
/// Implementations share one handle across all concurrent requests
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Listings matching `predicate`, ordered by `sort`, at most `limit` of them
    async fn find(
        &self,
        predicate: &Predicate,
        limit: usize,
        sort: SortOrder,
    ) -> StoreResult<Vec<Listing>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Listing>>;

    /// Store a new listing, assigning its `id` and `created_at`
    async fn insert(&self, listing: Listing) -> StoreResult<Listing>;

    /// Merge `patch` into the stored listing; `None` when no listing has `id`
    async fn update_by_id(&self, id: &str, patch: &ListingPatch) -> StoreResult<Option<Listing>>;

    /// Remove a listing, reporting whether it existed
    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<u64>;

    /// Store several new listings, returning how many were written
    async fn insert_many(&self, listings: Vec<Listing>) -> StoreResult<u64>;

    /// Get the name of the backing store
    fn source_name(&self) -> &'static str;

    /// Release connections before shutdown
    async fn close(&self) {}
}
