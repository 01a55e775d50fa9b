//! Port abstraction for listing persistence adapters.

use async_trait::async_trait;

use crate::domain::listing::{Listing, ListingDetail, ListingFields, ListingId, ListingWithOwner};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by listing repository adapters.
    pub enum ListingStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "listing store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "listing store query failed: {message}",
    }
}

/// Persistence operations for listings.
///
/// "Not found" is a first-class outcome: lookups return `Option` and
/// mutations report whether a row was touched, never an error.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Fetch every listing with its owner resolved. Full scan, no paging.
    async fn list(&self) -> Result<Vec<ListingWithOwner>, ListingStoreError>;

    /// Fetch one listing with owner and reviews resolved.
    async fn find_detail(&self, id: ListingId)
        -> Result<Option<ListingDetail>, ListingStoreError>;

    /// Fetch one listing without resolving references.
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingStoreError>;

    /// Persist a freshly created listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingStoreError>;

    /// Replace every mutable field of the identified listing.
    ///
    /// Returns `false` when no listing carries that id.
    async fn replace(
        &self,
        id: ListingId,
        fields: &ListingFields,
    ) -> Result<bool, ListingStoreError>;

    /// Delete the identified listing and, by cascade, its reviews.
    ///
    /// Returns `false` when no listing carries that id.
    async fn delete(&self, id: ListingId) -> Result<bool, ListingStoreError>;
}
