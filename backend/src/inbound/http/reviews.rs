//! Review actions nested under a listing.
//!
//! Reviews are append-only per listing: they can be created and deleted but
//! never edited. Both actions are guarded and both finish with a flash and a
//! redirect back to the listing detail page.

use actix_web::{delete, post, web, HttpResponse};
use serde_json::json;

use crate::domain::ports::ReviewStoreError;
use crate::domain::validation::{joined_message, ReviewInput};
use crate::domain::{Error, ListingId, Review, ReviewId};

use super::auth::AuthenticatedUser;
use super::flash::FlashMessage;
use super::listings::LISTING_MISSING_FLASH;
use super::session::SessionContext;
use super::state::HttpState;
use super::{map_review_store_error, see_other, ApiResult};

fn missing_listing(session: &SessionContext) -> ApiResult<HttpResponse> {
    session.push_flash(FlashMessage::error(LISTING_MISSING_FLASH))?;
    Ok(see_other("/listings"))
}

/// Append a review to a listing.
#[post("/listings/{id}/reviews")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<ReviewInput>,
) -> ApiResult<HttpResponse> {
    let raw_id = path.into_inner();
    let Some(listing_id) = ListingId::parse(&raw_id) else {
        return missing_listing(&session);
    };
    let fields = form.into_inner().validate().map_err(|violations| {
        Error::invalid_request(joined_message(&violations))
            .with_details(json!({ "violations": violations }))
    })?;
    let review = Review::new(listing_id, fields.rating, fields.comment);
    match state.reviews.append(&review).await {
        Ok(()) => {
            session.push_flash(FlashMessage::success("New Review Created!"))?;
            Ok(see_other(&format!("/listings/{listing_id}")))
        }
        Err(ReviewStoreError::MissingListing) => missing_listing(&session),
        Err(error) => Err(map_review_store_error(error)),
    }
}

/// Remove one review from a listing.
#[delete("/listings/{listing_id}/reviews/{review_id}")]
pub async fn delete(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_listing, raw_review) = path.into_inner();
    let Some(listing_id) = ListingId::parse(&raw_listing) else {
        return missing_listing(&session);
    };
    let Some(review_id) = ReviewId::parse(&raw_review) else {
        session.push_flash(FlashMessage::error("Review you requested does not exist!"))?;
        return Ok(see_other(&format!("/listings/{listing_id}")));
    };
    let detached = match state.reviews.detach(listing_id, review_id).await {
        Ok(detached) => detached,
        Err(ReviewStoreError::MissingListing) => return missing_listing(&session),
        Err(error) => return Err(map_review_store_error(error)),
    };
    if detached {
        session.push_flash(FlashMessage::success("Review deleted!"))?;
    } else {
        session.push_flash(FlashMessage::error("Review you requested does not exist!"))?;
    }
    Ok(see_other(&format!("/listings/{listing_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    use crate::domain::Rating;
    use crate::inbound::http::listings::tests::{cabin, login_cookie, rendered, seeded_user};
    use crate::inbound::http::test_utils::{session_cookie, stub_state, test_app, StubStore};

    #[actix_web::test]
    async fn create_appends_exactly_one_review() {
        let owner = seeded_user("ada");
        let listing = cabin(owner.id());
        let listing_id = listing.id();
        let store = StubStore::seeded(vec![owner.clone()], vec![listing], vec![]);
        let app = test::init_service(test_app(stub_state(&store))).await;
        let cookie = login_cookie(&app, owner.id()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/listings/{listing_id}/reviews"))
                .cookie(cookie)
                .set_form([("rating", "4"), ("comment", "Lovely stay")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            &format!("/listings/{listing_id}")
        );
        let reviews = store.reviews();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].listing_id(), listing_id);
        assert_eq!(reviews[0].rating().value(), 4);
        assert_eq!(reviews[0].comment(), "Lovely stay");

        let body = rendered(&app, "/listings", Some(session_cookie(&res))).await;
        assert_eq!(body["data"]["flashes"][0]["message"], "New Review Created!");
    }

    #[actix_web::test]
    async fn create_without_session_never_touches_the_store() {
        let owner = seeded_user("ada");
        let listing = cabin(owner.id());
        let listing_id = listing.id();
        let store = StubStore::seeded(vec![owner], vec![listing], vec![]);
        let before = store.call_count();
        let app = test::init_service(test_app(stub_state(&store))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/listings/{listing_id}/reviews"))
                .set_form([("rating", "4"), ("comment", "Lovely stay")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
        assert_eq!(store.call_count(), before);
        assert!(store.reviews().is_empty());
    }

    #[actix_web::test]
    async fn create_against_missing_listing_flashes_and_redirects() {
        let user = seeded_user("ada");
        let user_id = user.id();
        let store = StubStore::seeded(vec![user], vec![], vec![]);
        let app = test::init_service(test_app(stub_state(&store))).await;
        let cookie = login_cookie(&app, user_id).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/listings/7b40464f-4e3e-4c0c-9b69-b8e1e9c2b001/reviews")
                .cookie(cookie)
                .set_form([("rating", "4"), ("comment", "Lovely stay")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/listings");
        assert!(store.reviews().is_empty());

        let body = rendered(&app, "/listings", Some(session_cookie(&res))).await;
        assert_eq!(body["data"]["flashes"][0]["message"], LISTING_MISSING_FLASH);
    }

    #[actix_web::test]
    async fn invalid_review_body_reports_both_fields() {
        let owner = seeded_user("ada");
        let listing = cabin(owner.id());
        let listing_id = listing.id();
        let store = StubStore::seeded(vec![owner.clone()], vec![listing], vec![]);
        let app = test::init_service(test_app(stub_state(&store))).await;
        let cookie = login_cookie(&app, owner.id()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/listings/{listing_id}/reviews"))
                .cookie(cookie)
                .set_form([("rating", "9")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(res).await;
        let text = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(text.contains("rating"));
        assert!(text.contains("comment"));
        assert!(store.reviews().is_empty());
    }

    #[actix_web::test]
    async fn delete_detaches_the_review_and_flashes() {
        let owner = seeded_user("ada");
        let listing = cabin(owner.id());
        let listing_id = listing.id();
        let review = Review::new(
            listing_id,
            Rating::try_new(5).expect("valid rating"),
            "Great".to_owned(),
        );
        let review_id = review.id();
        let store = StubStore::seeded(vec![owner.clone()], vec![listing], vec![review]);
        let app = test::init_service(test_app(stub_state(&store))).await;
        let cookie = login_cookie(&app, owner.id()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/listings/{listing_id}/reviews/{review_id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            &format!("/listings/{listing_id}")
        );
        assert!(store.reviews().is_empty());

        let body = rendered(&app, "/listings", Some(session_cookie(&res))).await;
        assert_eq!(body["data"]["flashes"][0]["message"], "Review deleted!");
    }

    #[actix_web::test]
    async fn delete_under_missing_listing_flashes_and_redirects() {
        let user = seeded_user("ada");
        let user_id = user.id();
        let store = StubStore::seeded(vec![user], vec![], vec![]);
        let app = test::init_service(test_app(stub_state(&store))).await;
        let cookie = login_cookie(&app, user_id).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(concat!(
                    "/listings/7b40464f-4e3e-4c0c-9b69-b8e1e9c2b001",
                    "/reviews/7b40464f-4e3e-4c0c-9b69-b8e1e9c2b002"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/listings");

        let body = rendered(&app, "/listings", Some(session_cookie(&res))).await;
        assert_eq!(body["data"]["flashes"][0]["message"], LISTING_MISSING_FLASH);
        assert_eq!(body["data"]["flashes"][0]["level"], "error");
    }

    #[actix_web::test]
    async fn delete_unknown_review_flashes_error_and_redirects() {
        let owner = seeded_user("ada");
        let listing = cabin(owner.id());
        let listing_id = listing.id();
        let store = StubStore::seeded(vec![owner.clone()], vec![listing], vec![]);
        let app = test::init_service(test_app(stub_state(&store))).await;
        let cookie = login_cookie(&app, owner.id()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!(
                    "/listings/{listing_id}/reviews/7b40464f-4e3e-4c0c-9b69-b8e1e9c2b002"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            &format!("/listings/{listing_id}")
        );

        let body = rendered(&app, "/listings", Some(session_cookie(&res))).await;
        assert_eq!(
            body["data"]["flashes"][0]["message"],
            "Review you requested does not exist!"
        );
        assert_eq!(body["data"]["flashes"][0]["level"], "error");
    }
}
