//! Listing pages and actions.
//!
//! ```text
//! GET    /listings            collection
//! GET    /listings/new        creation form           (guarded)
//! GET    /listings/{id}       detail
//! POST   /listings            create                  (guarded, validated)
//! GET    /listings/{id}/edit  edit form               (guarded)
//! PUT    /listings/{id}       full-field replace      (guarded, validated)
//! DELETE /listings/{id}       delete                  (guarded)
//! ```
//!
//! A missing listing is a first-class outcome, answered with an error flash
//! and a redirect to the collection, never a fault.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::domain::validation::{joined_message, ListingInput, Violation};
use crate::domain::{Error, Listing, ListingId};

use super::auth::AuthenticatedUser;
use super::flash::FlashMessage;
use super::session::SessionContext;
use super::state::HttpState;
use super::{map_listing_store_error, render_page, see_other, ApiResult};

/// Flash shown whenever a listing id does not resolve.
pub const LISTING_MISSING_FLASH: &str = "Listing you requested does not exist!";

fn missing_listing(session: &SessionContext) -> ApiResult<HttpResponse> {
    session.push_flash(FlashMessage::error(LISTING_MISSING_FLASH))?;
    Ok(see_other("/listings"))
}

fn validation_error(violations: Vec<Violation>) -> Error {
    Error::invalid_request(joined_message(&violations))
        .with_details(json!({ "violations": violations }))
}

/// Display all listings with owners resolved. Full scan, no paging.
#[get("/listings")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let listings = state
        .listings
        .list()
        .await
        .map_err(map_listing_store_error)?;
    render_page(
        &state,
        &session,
        "listings/index",
        json!({ "listings": listings }),
    )
}

/// Render the empty creation form.
#[get("/listings/new")]
pub async fn new_form(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, "listings/new", json!({}))
}

/// Render one listing with owner and reviews resolved.
#[get("/listings/{id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = ListingId::parse(&path.into_inner()) else {
        return missing_listing(&session);
    };
    let Some(detail) = state
        .listings
        .find_detail(id)
        .await
        .map_err(map_listing_store_error)?
    else {
        return missing_listing(&session);
    };
    render_page(
        &state,
        &session,
        "listings/show",
        json!({
            "listing": detail.listing,
            "owner": detail.owner,
            "reviews": detail.reviews,
        }),
    )
}

/// Create a listing owned by the session user.
#[post("/listings")]
pub async fn create(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ListingInput>,
) -> ApiResult<HttpResponse> {
    let fields = form.into_inner().validate().map_err(validation_error)?;
    let listing = Listing::new(fields, user.0);
    state
        .listings
        .insert(&listing)
        .await
        .map_err(map_listing_store_error)?;
    session.push_flash(FlashMessage::success("New Listing Created!"))?;
    Ok(see_other("/listings"))
}

/// Render the edit form for one listing.
#[get("/listings/{id}/edit")]
pub async fn edit_form(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = ListingId::parse(&path.into_inner()) else {
        return missing_listing(&session);
    };
    let Some(listing) = state
        .listings
        .find_by_id(id)
        .await
        .map_err(map_listing_store_error)?
    else {
        return missing_listing(&session);
    };
    render_page(
        &state,
        &session,
        "listings/edit",
        json!({ "listing": listing }),
    )
}

/// Replace every mutable field of one listing.
#[put("/listings/{id}")]
pub async fn update(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<ListingInput>,
) -> ApiResult<HttpResponse> {
    let raw_id = path.into_inner();
    let Some(id) = ListingId::parse(&raw_id) else {
        return missing_listing(&session);
    };
    let fields = form.into_inner().validate().map_err(validation_error)?;
    let replaced = state
        .listings
        .replace(id, &fields)
        .await
        .map_err(map_listing_store_error)?;
    if !replaced {
        return missing_listing(&session);
    }
    session.push_flash(FlashMessage::success("Listing Updated Successfully!"))?;
    Ok(see_other(&format!("/listings/{id}")))
}

/// Delete one listing (reviews go with it).
#[delete("/listings/{id}")]
pub async fn delete(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = ListingId::parse(&path.into_inner()) else {
        return missing_listing(&session);
    };
    let deleted = state
        .listings
        .delete(id)
        .await
        .map_err(map_listing_store_error)?;
    if !deleted {
        return missing_listing(&session);
    }
    session.push_flash(FlashMessage::success("Listing Deleted Successfully!"))?;
    Ok(see_other("/listings"))
}
