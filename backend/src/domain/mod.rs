//! Domain entities, validation, and ports.
//!
//! Purpose: define the strongly typed records of the listing-and-review
//! system (User, Listing, Review), the structural validation of write
//! bodies, and the port traits persistence and rendering adapters implement.
//! Everything here is transport and storage agnostic.

pub mod credentials;
pub mod error;
pub mod listing;
pub mod ports;
pub mod review;
pub mod user;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::listing::{
    Listing, ListingDetail, ListingFields, ListingId, ListingWithOwner, PLACEHOLDER_IMAGE_URL,
};
pub use self::review::{Rating, Review, ReviewId, ReviewValidationError};
pub use self::user::{Email, User, UserId, UserValidationError, Username};

/// Convenient result alias for handlers returning domain errors.
pub type ApiResult<T> = Result<T, Error>;
