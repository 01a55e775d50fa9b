//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with domain-friendly
//! operations: the authenticated user id, queued flash messages, and the
//! post-login return path.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

use super::flash::FlashMessage;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flash";
pub(crate) const RETURN_TO_KEY: &str = "return_to";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// End the login: drop the user id and return path, rotate the session
    /// id, and keep any queued flashes for the next rendered page.
    pub fn end_login(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.remove(RETURN_TO_KEY);
        self.0.renew();
    }

    /// Queue a flash message for the next rendered page.
    pub fn push_flash(&self, flash: FlashMessage) -> Result<(), Error> {
        let mut queued = self.peek_flashes()?;
        queued.push(flash);
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to queue flash: {error}")))
    }

    /// Consume every queued flash message.
    pub fn take_flashes(&self) -> Result<Vec<FlashMessage>, Error> {
        let queued = self.peek_flashes()?;
        if !queued.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        Ok(queued)
    }

    fn peek_flashes(&self) -> Result<Vec<FlashMessage>, Error> {
        self.0
            .get::<Vec<FlashMessage>>(FLASH_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| Error::internal(format!("failed to read flashes: {error}")))
    }

    /// Remember the originally requested path for the post-login redirect.
    pub fn remember_return_to(&self, path: &str) -> Result<(), Error> {
        self.0
            .insert(RETURN_TO_KEY, path)
            .map_err(|error| Error::internal(format!("failed to store return path: {error}")))
    }

    /// Consume the stored post-login return path, if any.
    pub fn take_return_to(&self) -> Result<Option<String>, Error> {
        let path = self
            .0
            .get::<String>(RETURN_TO_KEY)
            .map_err(|error| Error::internal(format!("failed to read return path: {error}")))?;
        if path.is_some() {
            self.0.remove(RETURN_TO_KEY);
        }
        Ok(path)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
