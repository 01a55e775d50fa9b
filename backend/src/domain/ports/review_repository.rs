//! Port abstraction for review persistence adapters.

use async_trait::async_trait;

use crate::domain::listing::ListingId;
use crate::domain::review::{Review, ReviewId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "review store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review store query failed: {message}",
        /// The parent listing does not exist.
        MissingListing => "listing does not exist",
    }
}

/// Persistence operations for reviews.
///
/// Both operations touch the parent listing and the review record; adapters
/// must make each one atomic so a fault between the two writes cannot leave
/// a dangling reference or an orphaned review.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Append a review to its parent listing's collection.
    ///
    /// Fails with [`ReviewStoreError::MissingListing`] when the parent does
    /// not exist.
    async fn append(&self, review: &Review) -> Result<(), ReviewStoreError>;

    /// Detach a review from the parent listing and delete its record.
    ///
    /// Returns `false` when the review is not in the listing's collection.
    /// Fails with [`ReviewStoreError::MissingListing`] when the parent does
    /// not exist.
    async fn detach(
        &self,
        listing_id: ListingId,
        review_id: ReviewId,
    ) -> Result<bool, ReviewStoreError>;
}
