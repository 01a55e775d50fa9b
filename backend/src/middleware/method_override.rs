//! HTTP method override for HTML forms.
//!
//! Browsers only submit `GET` and `POST` forms, yet the route table speaks
//! `PUT` and `DELETE`. A form posts to `?_method=PUT` (or `DELETE`) and this
//! middleware rewrites the method before routing. Only those two targets are
//! honoured, and only on `POST`, so the override cannot downgrade or invent
//! methods.

use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{ready, Ready};

const OVERRIDE_PARAM: &str = "_method";

fn override_from_query(query: &str) -> Option<Method> {
    let value = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == OVERRIDE_PARAM).then_some(value)
    })?;
    if value.eq_ignore_ascii_case("put") {
        Some(Method::PUT)
    } else if value.eq_ignore_ascii_case("delete") {
        Some(Method::DELETE)
    } else {
        None
    }
}

/// Middleware rewriting `POST ?_method=PUT|DELETE` before route matching.
#[derive(Clone)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_from_query(req.query_string()) {
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}
