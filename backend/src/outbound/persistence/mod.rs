//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` pooling. Adapters stay thin:
//! they translate between Diesel row structs and domain types and map
//! database failures onto the port error enums; no business rules live
//! here. Row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal and never reach the domain layer.

mod diesel_listing_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_listing_repository::DieselListingRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// Migrations compiled into the binary from the crate's `migrations/` tree.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations over a short-lived synchronous connection.
///
/// `diesel_migrations` only speaks sync Diesel, so callers on the async
/// runtime should wrap this in `spawn_blocking`.
pub fn run_migrations(database_url: &str) -> Result<(), PoolError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|error| PoolError::build(error.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            if !applied.is_empty() {
                tracing::info!(count = applied.len(), "applied database migrations");
            }
        })
        .map_err(|error| PoolError::build(error.to_string()))
}
