use crate::error::StoreError;
use crate::filters::ListingQuery;
use crate::models::RawListing;
use async_trait::async_trait;

/// Read access to the listings store.
///
/// Implementations apply every predicate of the query server-side and return
/// rows joined with their category, newest first.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch listing rows matching the query
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<RawListing>, StoreError>;

    /// Fetch the category slug of every listing, one entry per listing
    async fn fetch_category_slugs(&self) -> Result<Vec<String>, StoreError>;

    /// Get the name of the store backend
    fn store_name(&self) -> &'static str;
}
