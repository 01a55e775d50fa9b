//! HTTP inbound adapter: server-rendered pages and redirects.
//!
//! Handlers follow one shape: guard (if required), validate the body (if one
//! is expected), perform one or two port calls, then render a page or
//! redirect with a flash message.

pub mod auth;
pub mod error;
pub mod flash;
pub mod listings;
pub mod reviews;
pub mod session;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;

use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::domain::ports::{ListingStoreError, RenderError, ReviewStoreError, UserStoreError};
use crate::domain::Error;

pub use error::ApiResult;
pub use state::HttpState;

use session::SessionContext;

/// Register the full route table.
///
/// `/listings/new` must stay registered ahead of `/listings/{id}` so the
/// literal segment wins the match.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(listings::index)
        .service(listings::new_form)
        .service(listings::create)
        .service(listings::edit_form)
        .service(listings::update)
        .service(listings::delete)
        .service(listings::show)
        .service(reviews::create)
        .service(reviews::delete)
        .service(users::signup_form)
        .service(users::signup)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout);
}

/// Landing redirect to the listing collection.
#[actix_web::get("/")]
async fn home() -> HttpResponse {
    see_other("/listings")
}

/// Redirect after a completed action, in the POST-redirect-GET style.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Render a page, merging queued flash messages and the current login state
/// into the payload under `flashes` and `currentUserId`.
pub(crate) fn render_page(
    state: &HttpState,
    session: &SessionContext,
    view: &str,
    mut data: Value,
) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    let current_user = session.user_id()?;
    if let Value::Object(map) = &mut data {
        map.insert(
            "flashes".to_owned(),
            serde_json::to_value(flashes)
                .map_err(|error| Error::internal(format!("flash payload: {error}")))?,
        );
        map.insert(
            "currentUserId".to_owned(),
            current_user
                .map(|id| Value::String(id.to_string()))
                .unwrap_or(Value::Null),
        );
    }
    let body = state.views.render(view, &data).map_err(map_render_error)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

pub(crate) fn map_render_error(error: RenderError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_listing_store_error(error: ListingStoreError) -> Error {
    match error {
        ListingStoreError::Connection { message } => Error::service_unavailable(message),
        ListingStoreError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
        UserStoreError::DuplicateIdentity { .. } => Error::conflict(error.to_string()),
    }
}

/// Review-store errors reaching this mapper exclude `MissingListing`, which
/// handlers turn into a flash redirect first.
pub(crate) fn map_review_store_error(error: ReviewStoreError) -> Error {
    match error {
        ReviewStoreError::Connection { message } => Error::service_unavailable(message),
        ReviewStoreError::Query { message } => Error::internal(message),
        ReviewStoreError::MissingListing => Error::not_found(error.to_string()),
    }
}
