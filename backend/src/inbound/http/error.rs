//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting handlers bubble
//! failures with `?`. Errors surface as a minimal server-rendered page;
//! internal messages are redacted before they reach a client.

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_facing_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable => "Something went wrong",
        _ => error.message(),
    }
}

/// Render the generic fault page. No template lookup happens here so the
/// error path cannot itself fail on a missing view.
fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status
        .canonical_reason()
        .unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{heading}</title></head>\n\
         <body><main><h1>{heading}</h1><p>{}</p><p><a href=\"/listings\">Back to all listings</a></p></main></body>\n</html>\n",
        handlebars::html_escape(message)
    )
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(
            self.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(code = ?self.code(), message = %self.message(), "request failed");
        }
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(error_page(self.status_code(), client_facing_message(self)))
    }
}
