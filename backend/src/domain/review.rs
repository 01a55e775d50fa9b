//! Review data model.
//!
//! A review belongs to exactly one listing. The listing's review collection
//! is the set of review records bearing its id, ordered by creation time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::listing::ListingId;

/// Lower inclusive rating bound.
pub const RATING_MIN: i32 = 1;
/// Upper inclusive rating bound.
pub const RATING_MAX: i32 = 5;

/// Validation error for review fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("rating must be between {RATING_MIN} and {RATING_MAX}")]
    RatingOutOfBounds,
}

/// Stable review identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Parse a [`ReviewId`] from its string form.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Generate a new random [`ReviewId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounded numeric rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating(i32);

impl Rating {
    /// Validate and construct a [`Rating`].
    pub fn try_new(value: i32) -> Result<Self, ReviewValidationError> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(ReviewValidationError::RatingOutOfBounds);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// A rating-and-comment record scoped to exactly one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: ReviewId,
    listing_id: ListingId,
    rating: Rating,
    comment: String,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review for the given listing.
    pub fn new(listing_id: ListingId, rating: Rating, comment: String) -> Self {
        Self {
            id: ReviewId::random(),
            listing_id,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }

    /// Reassemble a review from stored parts. Used by persistence adapters.
    pub fn from_storage(
        id: ReviewId,
        listing_id: ListingId,
        rating: Rating,
        comment: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            listing_id,
            rating,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn listing_id(&self) -> ListingId {
        self.listing_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_in_bound_ratings(#[case] value: i32) {
        assert_eq!(Rating::try_new(value).expect("valid rating").value(), value);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    fn rejects_out_of_bound_ratings(#[case] value: i32) {
        assert_eq!(
            Rating::try_new(value).unwrap_err(),
            ReviewValidationError::RatingOutOfBounds
        );
    }

    #[test]
    fn review_records_its_parent_listing() {
        let listing_id = ListingId::random();
        let review = Review::new(
            listing_id,
            Rating::try_new(5).expect("valid rating"),
            "Great".to_owned(),
        );
        assert_eq!(review.listing_id(), listing_id);
    }
}
