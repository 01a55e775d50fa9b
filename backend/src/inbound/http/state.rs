//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! domain ports and remain testable without a database or template files.

use std::sync::Arc;

use crate::domain::ports::{ListingRepository, ReviewRepository, UserRepository, ViewRenderer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub listings: Arc<dyn ListingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub users: Arc<dyn UserRepository>,
    pub views: Arc<dyn ViewRenderer>,
}

impl HttpState {
    /// Bundle the port implementations the handlers need.
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            listings,
            reviews,
            users,
            views,
        }
    }
}
