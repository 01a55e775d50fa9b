//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{User, UserId, Username};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A user already holds this username or email.
        DuplicateIdentity { field: String } => "a user with this {field} already exists",
    }
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a freshly registered user.
    ///
    /// Fails with [`UserStoreError::DuplicateIdentity`] when the username or
    /// email is already taken.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch a user by login name.
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;
}
