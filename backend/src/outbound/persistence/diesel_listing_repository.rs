//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! A thin adapter: queries join listings to their owners, map rows into
//! domain types, and translate Diesel failures into `ListingStoreError`.
//! Mutations report the touched row count as a boolean so "not found" stays
//! a first-class outcome rather than an error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ListingRepository, ListingStoreError};
use crate::domain::{Listing, ListingDetail, ListingFields, ListingId, ListingWithOwner};

use super::models::{ListingChangeset, ListingRow, NewListingRow, ReviewRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{listings, reviews, users};

/// Diesel-backed implementation of the `ListingRepository` port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListingStoreError {
    ListingStoreError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> ListingStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(%error, "diesel listing operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ListingStoreError::connection("database connection error")
        }
        other => ListingStoreError::query(other.to_string()),
    }
}

fn pair_to_domain((listing, owner): (ListingRow, UserRow)) -> Result<ListingWithOwner, ListingStoreError> {
    let owner = owner.into_domain().map_err(ListingStoreError::query)?;
    Ok(ListingWithOwner {
        listing: listing.into_domain(),
        owner,
    })
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn list(&self) -> Result<Vec<ListingWithOwner>, ListingStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(ListingRow, UserRow)> = listings::table
            .inner_join(users::table)
            .select((ListingRow::as_select(), UserRow::as_select()))
            .order(listings::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(pair_to_domain).collect()
    }

    async fn find_detail(
        &self,
        id: ListingId,
    ) -> Result<Option<ListingDetail>, ListingStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pair: Option<(ListingRow, UserRow)> = listings::table
            .inner_join(users::table)
            .filter(listings::id.eq(id.as_uuid()))
            .select((ListingRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(pair) = pair else {
            return Ok(None);
        };
        let ListingWithOwner { listing, owner } = pair_to_domain(pair)?;

        let review_rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::listing_id.eq(id.as_uuid()))
            .order(reviews::created_at.asc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let reviews = review_rows
            .into_iter()
            .map(|row| row.into_domain().map_err(ListingStoreError::query))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ListingDetail {
            listing,
            owner,
            reviews,
        }))
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ListingRow> = listings::table
            .filter(listings::id.eq(id.as_uuid()))
            .select(ListingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(ListingRow::into_domain))
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(listings::table)
            .values(NewListingRow::from_domain(listing))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn replace(
        &self,
        id: ListingId,
        fields: &ListingFields,
    ) -> Result<bool, ListingStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(listings::table.filter(listings::id.eq(id.as_uuid())))
            .set(ListingChangeset::from_fields(fields))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: ListingId) -> Result<bool, ListingStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Reviews go with the listing via the ON DELETE CASCADE constraint.
        let deleted = diesel::delete(listings::table.filter(listings::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
