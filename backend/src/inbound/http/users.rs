//! Registration, login, and logout.
//!
//! Form failures on these routes are reported as flashes on the form they
//! came from rather than error pages, so a browser user never leaves the
//! flow. Login failures share one message regardless of whether the
//! username or the password was wrong.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::credentials::{hash_password, verify_password, LoginCredentials};
use crate::domain::validation::{joined_message, SignupInput};
use crate::domain::{Error, User, Username};

use super::flash::FlashMessage;
use super::session::SessionContext;
use super::state::HttpState;
use super::{map_user_store_error, render_page, see_other, ApiResult};

/// Flash shown when login credentials do not match an account.
pub const BAD_CREDENTIALS_FLASH: &str = "Invalid username or password!";

/// Raw login body. Unlike signup it carries no structural rules beyond
/// non-emptiness, so it stays here rather than in the validation module.
#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn back_to_form(
    session: &SessionContext,
    message: impl Into<String>,
    form_path: &str,
) -> ApiResult<HttpResponse> {
    session.push_flash(FlashMessage::error(message))?;
    Ok(see_other(form_path))
}

fn map_credential_error(error: crate::domain::credentials::CredentialError) -> Error {
    Error::internal(error.to_string())
}

/// Render the registration form.
#[get("/signup")]
pub async fn signup_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, "users/signup", json!({}))
}

/// Register a new account and log it in.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignupInput>,
) -> ApiResult<HttpResponse> {
    let fields = match form.into_inner().validate() {
        Ok(fields) => fields,
        Err(violations) => {
            return back_to_form(&session, joined_message(&violations), "/signup");
        }
    };

    // Argon2 is deliberately slow; keep it off the async executor.
    let password = fields.password;
    let hash = web::block(move || hash_password(&password))
        .await
        .map_err(|error| Error::internal(error.to_string()))?
        .map_err(map_credential_error)?;

    let user = User::new(fields.username, fields.email, hash);
    match state.users.insert(&user).await {
        Ok(()) => {}
        Err(error @ crate::domain::ports::UserStoreError::DuplicateIdentity { .. }) => {
            return back_to_form(&session, error.to_string(), "/signup");
        }
        Err(error) => return Err(map_user_store_error(error)),
    }

    session.persist_user(user.id())?;
    session.push_flash(FlashMessage::success("Welcome! Your account is ready."))?;
    Ok(see_other("/listings"))
}

/// Render the login form.
#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, "users/login", json!({}))
}

/// Establish a session from submitted credentials.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginInput>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let Ok(credentials) = LoginCredentials::try_from_parts(&form.username, &form.password) else {
        return back_to_form(&session, BAD_CREDENTIALS_FLASH, "/login");
    };
    // A structurally invalid username cannot match an account.
    let Ok(username) = Username::new(credentials.username()) else {
        return back_to_form(&session, BAD_CREDENTIALS_FLASH, "/login");
    };

    let Some(user) = state
        .users
        .find_by_username(&username)
        .await
        .map_err(map_user_store_error)?
    else {
        return back_to_form(&session, BAD_CREDENTIALS_FLASH, "/login");
    };

    let stored_hash = user.password_hash().to_owned();
    let password = credentials.password().to_owned();
    let matches = web::block(move || verify_password(&stored_hash, &password))
        .await
        .map_err(|error| Error::internal(error.to_string()))?
        .map_err(map_credential_error)?;
    if !matches {
        return back_to_form(&session, BAD_CREDENTIALS_FLASH, "/login");
    }

    session.persist_user(user.id())?;
    session.push_flash(FlashMessage::success("Welcome back!"))?;
    let destination = session
        .take_return_to()?
        .unwrap_or_else(|| "/listings".to_owned());
    Ok(see_other(&destination))
}

/// Drop the session and return to the collection.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.end_login();
    session.push_flash(FlashMessage::success("You are logged out!"))?;
    Ok(see_other("/listings"))
}
