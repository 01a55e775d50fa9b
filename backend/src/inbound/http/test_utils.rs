//! Test helpers for inbound HTTP components: an in-memory store double, a
//! JSON-echo view renderer, and an app factory mirroring the real route
//! table plus a login shortcut route.

use std::sync::{Arc, Mutex};

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{web, App, HttpResponse};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::ports::{
    ListingRepository, ListingStoreError, RenderError, ReviewRepository, ReviewStoreError,
    UserRepository, UserStoreError, ViewRenderer,
};
use crate::domain::{
    Listing, ListingDetail, ListingFields, ListingId, ListingWithOwner, Review, ReviewId, User,
    UserId, Username,
};

use super::session::SessionContext;
use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

#[derive(Default)]
pub(crate) struct StoreState {
    pub users: Vec<User>,
    pub listings: Vec<Listing>,
    pub reviews: Vec<Review>,
    /// Total repository calls across every port; the guard tests assert
    /// this stays at zero for rejected requests.
    pub calls: usize,
}

/// In-memory implementation of all three persistence ports.
#[derive(Default)]
pub(crate) struct StubStore {
    pub state: Mutex<StoreState>,
}

impl StubStore {
    pub fn seeded(users: Vec<User>, listings: Vec<Listing>, reviews: Vec<Review>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(StoreState {
                users,
                listings,
                reviews,
                calls: 0,
            }),
        })
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().expect("state lock").calls
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.state.lock().expect("state lock").listings.clone()
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.state.lock().expect("state lock").reviews.clone()
    }

    fn owner_of(state: &StoreState, listing: &Listing) -> Result<User, ListingStoreError> {
        state
            .users
            .iter()
            .find(|user| user.id() == listing.owner_id())
            .cloned()
            .ok_or_else(|| ListingStoreError::query("listing owner not seeded"))
    }
}

#[async_trait]
impl ListingRepository for StubStore {
    async fn list(&self) -> Result<Vec<ListingWithOwner>, ListingStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        let state = &*state;
        state
            .listings
            .iter()
            .map(|listing| {
                Ok(ListingWithOwner {
                    listing: listing.clone(),
                    owner: Self::owner_of(state, listing)?,
                })
            })
            .collect()
    }

    async fn find_detail(
        &self,
        id: ListingId,
    ) -> Result<Option<ListingDetail>, ListingStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        let state = &*state;
        let Some(listing) = state.listings.iter().find(|listing| listing.id() == id) else {
            return Ok(None);
        };
        let owner = Self::owner_of(state, listing)?;
        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .filter(|review| review.listing_id() == id)
            .cloned()
            .collect();
        reviews.sort_by_key(Review::created_at);
        Ok(Some(ListingDetail {
            listing: listing.clone(),
            owner,
            reviews,
        }))
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        Ok(state
            .listings
            .iter()
            .find(|listing| listing.id() == id)
            .cloned())
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        state.listings.push(listing.clone());
        Ok(())
    }

    async fn replace(
        &self,
        id: ListingId,
        fields: &ListingFields,
    ) -> Result<bool, ListingStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        let Some(existing) = state.listings.iter_mut().find(|listing| listing.id() == id)
        else {
            return Ok(false);
        };
        *existing = Listing::from_storage(
            existing.id(),
            fields.clone(),
            existing.owner_id(),
            existing.created_at(),
        );
        Ok(true)
    }

    async fn delete(&self, id: ListingId) -> Result<bool, ListingStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        let before = state.listings.len();
        state.listings.retain(|listing| listing.id() != id);
        let removed = state.listings.len() < before;
        if removed {
            // Mirrors the cascade delete of the real schema.
            state.reviews.retain(|review| review.listing_id() != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ReviewRepository for StubStore {
    async fn append(&self, review: &Review) -> Result<(), ReviewStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        if !state
            .listings
            .iter()
            .any(|listing| listing.id() == review.listing_id())
        {
            return Err(ReviewStoreError::missing_listing());
        }
        state.reviews.push(review.clone());
        Ok(())
    }

    async fn detach(
        &self,
        listing_id: ListingId,
        review_id: ReviewId,
    ) -> Result<bool, ReviewStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        if !state.listings.iter().any(|listing| listing.id() == listing_id) {
            return Err(ReviewStoreError::missing_listing());
        }
        let before = state.reviews.len();
        state
            .reviews
            .retain(|review| !(review.id() == review_id && review.listing_id() == listing_id));
        Ok(state.reviews.len() < before)
    }
}

#[async_trait]
impl UserRepository for StubStore {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        if state
            .users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserStoreError::duplicate_identity("username"));
        }
        if state.users.iter().any(|existing| existing.email() == user.email()) {
            return Err(UserStoreError::duplicate_identity("email"));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        Ok(state
            .users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.calls += 1;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }
}

/// Renderer double echoing the view name and payload as JSON so tests can
/// assert on exactly what would reach the template.
pub(crate) struct EchoRenderer;

impl ViewRenderer for EchoRenderer {
    fn render(&self, view: &str, data: &Value) -> Result<String, RenderError> {
        Ok(json!({ "view": view, "data": data }).to_string())
    }
}

pub(crate) fn stub_state(store: &Arc<StubStore>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(EchoRenderer),
    ))
}

async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> super::ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|error| crate::domain::Error::invalid_request(error.to_string()))?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Build an app with the production route table plus `/test/login/{id}`.
pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .route("/test/login/{id}", web::get().to(test_login))
        .configure(super::routes)
}

/// Extract the `session` cookie from a test response.
pub(crate) fn session_cookie(
    response: &actix_web::dev::ServiceResponse,
) -> actix_web::cookie::Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
