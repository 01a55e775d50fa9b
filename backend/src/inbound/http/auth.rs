//! Access guard for authenticated routes.
//!
//! [`AuthenticatedUser`] is an extractor: declaring it as a handler argument
//! gates the route. When the session carries no valid user id the extractor
//! queues an error flash, remembers the requested path for the post-login
//! redirect, and answers with a redirect to the login page — the handler
//! body (and therefore the database layer) is never reached.

use actix_session::Session;
use actix_web::http::{header, StatusCode};
use actix_web::{dev::Payload, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::UserId;

use super::flash::FlashMessage;
use super::session::SessionContext;

/// Flash shown when an unauthenticated request hits a guarded route.
pub const LOGIN_REQUIRED_FLASH: &str = "You must be logged in!";

/// The authenticated session subject.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

/// Guard failure: answered with a redirect to the login page.
#[derive(Debug, thiserror::Error)]
#[error("login required")]
pub struct LoginRedirect;

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/login"))
            .finish()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let requested_path = req.path().to_owned();
        let fut = Session::from_request(req, payload);
        Box::pin(async move {
            let session = SessionContext::new(fut.await?);
            match session.user_id() {
                Ok(Some(user_id)) => Ok(AuthenticatedUser(user_id)),
                Ok(None) => {
                    session.push_flash(FlashMessage::error(LOGIN_REQUIRED_FLASH))?;
                    session.remember_return_to(&requested_path)?;
                    Err(LoginRedirect.into())
                }
                Err(error) => Err(error.into()),
            }
        })
    }
}
