//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. Conversions back to domain types revalidate
//! the stored text fields so a corrupted row surfaces as a query error
//! instead of an invalid domain value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Email, Listing, ListingFields, ListingId, Rating, Review, ReviewId, User, UserId, Username,
};

use super::schema::{listings, reviews, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert a stored row back into the domain user.
    pub fn into_domain(self) -> Result<User, String> {
        let username = Username::new(self.username)
            .map_err(|error| format!("stored username invalid: {error}"))?;
        let email =
            Email::new(self.email).map_err(|error| format!("stored email invalid: {error}"))?;
        Ok(User::from_storage(
            UserId::from_uuid(self.id),
            username,
            email,
            self.password_hash,
            self.created_at,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewUserRow<'a> {
    pub fn from_domain(user: &'a User) -> Self {
        Self {
            id: user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash(),
            created_at: user.created_at(),
        }
    }
}

/// Row struct for reading from the listings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: i64,
    pub location: String,
    pub country: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ListingRow {
    pub fn into_domain(self) -> Listing {
        Listing::from_storage(
            ListingId::from_uuid(self.id),
            ListingFields {
                title: self.title,
                description: self.description,
                image_url: self.image_url,
                price: self.price,
                location: self.location,
                country: self.country,
            },
            UserId::from_uuid(self.owner_id),
            self.created_at,
        )
    }
}

/// Insertable struct for creating new listing records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = listings)]
pub(crate) struct NewListingRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub price: i64,
    pub location: &'a str,
    pub country: &'a str,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewListingRow<'a> {
    pub fn from_domain(listing: &'a Listing) -> Self {
        let fields = listing.fields();
        Self {
            id: listing.id().as_uuid(),
            title: &fields.title,
            description: &fields.description,
            image_url: &fields.image_url,
            price: fields.price,
            location: &fields.location,
            country: &fields.country,
            owner_id: listing.owner_id().as_uuid(),
            created_at: listing.created_at(),
        }
    }
}

/// Changeset replacing every mutable listing column. Owner and creation
/// timestamp are deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = listings)]
pub(crate) struct ListingChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub price: i64,
    pub location: &'a str,
    pub country: &'a str,
}

impl<'a> ListingChangeset<'a> {
    pub fn from_fields(fields: &'a ListingFields) -> Self {
        Self {
            title: &fields.title,
            description: &fields.description,
            image_url: &fields.image_url,
            price: fields.price,
            location: &fields.location,
            country: &fields.country,
        }
    }
}

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewRow {
    pub fn into_domain(self) -> Result<Review, String> {
        let rating = Rating::try_new(self.rating)
            .map_err(|error| format!("stored rating invalid: {error}"))?;
        Ok(Review::from_storage(
            ReviewId::from_uuid(self.id),
            ListingId::from_uuid(self.listing_id),
            rating,
            self.comment,
            self.created_at,
        ))
    }
}

/// Insertable struct for creating new review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub rating: i32,
    pub comment: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewReviewRow<'a> {
    pub fn from_domain(review: &'a Review) -> Self {
        Self {
            id: review.id().as_uuid(),
            listing_id: review.listing_id().as_uuid(),
            rating: review.rating().value(),
            comment: review.comment(),
            created_at: review.created_at(),
        }
    }
}
