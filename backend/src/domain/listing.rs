//! Listing data model.
//!
//! A listing has exactly one owner, set at creation from the authenticated
//! session and never reassigned. Updates replace every mutable field at once;
//! partial patches do not exist in this system.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::review::Review;
use super::user::{User, UserId};

/// Fallback image shown when a listing is created without one.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1625505826533-5c80aca7d157";

/// Stable listing identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Parse a [`ListingId`] from its string form.
    ///
    /// Returns `None` for anything that is not a UUID; callers treat that
    /// the same as a listing that does not exist.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Generate a new random [`ListingId`].
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

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The replaceable field set of a listing.
///
/// Produced by [`crate::domain::validation::ListingInput::validate`]; a value
/// of this type has already passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFields {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: i64,
    pub location: String,
    pub country: String,
}

/// A rental-property record with one owning user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    id: ListingId,
    #[serde(flatten)]
    fields: ListingFields,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl Listing {
    /// Create a new listing owned by the given user.
    pub fn new(fields: ListingFields, owner_id: UserId) -> Self {
        Self {
            id: ListingId::random(),
            fields,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Reassemble a listing from stored parts. Used by persistence adapters.
    pub fn from_storage(
        id: ListingId,
        fields: ListingFields,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            owner_id,
            created_at,
        }
    }

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn fields(&self) -> &ListingFields {
        &self.fields
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Collection-view projection: a listing joined with its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingWithOwner {
    pub listing: Listing,
    pub owner: User,
}

/// Detail-view projection: a listing with owner and reviews resolved.
///
/// Reviews appear in append order (creation time ascending).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDetail {
    pub listing: Listing,
    pub owner: User,
    pub reviews: Vec<Review>,
}
