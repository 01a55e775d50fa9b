//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.
//!
//! Both operations run inside one transaction: the parent listing is
//! checked and the review row written or removed atomically, so a listing
//! deleted between the check and the write rolls the whole request back
//! instead of leaving an orphan.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ReviewRepository, ReviewStoreError};
use crate::domain::{ListingId, Review, ReviewId};

use super::models::NewReviewRow;
use super::pool::{DbPool, PoolError};
use super::schema::{listings, reviews};

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewStoreError {
    ReviewStoreError::connection(error.message())
}

/// Lets `?` inside the transaction closures promote Diesel errors, which the
/// transaction wrapper also relies on for rollback propagation.
impl From<diesel::result::Error> for ReviewStoreError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        debug!(%error, "diesel review operation failed");
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                ReviewStoreError::connection("database connection error")
            }
            // The cascade FK can fire when the listing vanishes mid-write.
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                ReviewStoreError::missing_listing()
            }
            other => ReviewStoreError::query(other.to_string()),
        }
    }
}

async fn listing_exists<C>(conn: &mut C, listing_id: Uuid) -> Result<bool, diesel::result::Error>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let found: Option<Uuid> = listings::table
        .filter(listings::id.eq(listing_id))
        .select(listings::id)
        .first(conn)
        .await
        .optional()?;
    Ok(found.is_some())
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn append(&self, review: &Review) -> Result<(), ReviewStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewReviewRow::from_domain(review);

        conn.transaction::<_, ReviewStoreError, _>(|conn| {
            async move {
                if !listing_exists(conn, row.listing_id).await? {
                    return Err(ReviewStoreError::missing_listing());
                }
                diesel::insert_into(reviews::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn detach(
        &self,
        listing_id: ListingId,
        review_id: ReviewId,
    ) -> Result<bool, ReviewStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, ReviewStoreError, _>(|conn| {
            async move {
                if !listing_exists(conn, listing_id.as_uuid()).await? {
                    return Err(ReviewStoreError::missing_listing());
                }
                let removed = diesel::delete(
                    reviews::table
                        .filter(reviews::id.eq(review_id.as_uuid()))
                        .filter(reviews::listing_id.eq(listing_id.as_uuid())),
                )
                .execute(conn)
                .await?;
                Ok(removed > 0)
            }
            .scope_boxed()
        })
        .await
    }
}
