//! Domain ports: the traits adapters implement.
//!
//! Inbound handlers depend only on these traits (through `HttpState`), never
//! on Diesel or Handlebars directly, so every handler is testable with
//! in-memory stubs.

pub(crate) mod macros;

mod listing_repository;
mod review_repository;
mod user_repository;
mod view_renderer;

pub use listing_repository::{ListingRepository, ListingStoreError};
pub use review_repository::{ReviewRepository, ReviewStoreError};
pub use user_repository::{UserRepository, UserStoreError};
pub use view_renderer::{RenderError, ViewRenderer};
