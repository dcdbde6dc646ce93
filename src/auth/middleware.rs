use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the bearer token.
pub const TOKEN_COOKIE: &str = "task_app_token";

/// Extracts the token value from a raw `Cookie` header.
///
/// The header is a list of `name=value` pairs separated by `;`, with optional
/// whitespace around each pair. Returns `None` when no `task_app_token`
/// segment is present.
pub fn token_from_cookie_header(cookies: &str) -> Option<&str> {
    cookies
        .split(';')
        .map(str::trim)
        .find(|pair| pair.starts_with(TOKEN_COOKIE))
        .and_then(|pair| pair.split('=').nth(1))
}

/// Authentication gate applied to the whole application.
///
/// Public routes (index, health, sign-up, sign-in) pass straight through.
/// Every other route requires a verifiable token in the `task_app_token`
/// cookie; on success the decoded claims are inserted into the request
/// extensions for [`crate::auth::AuthenticatedUser`] to pick up, and on any
/// failure the request is short-circuited with the 401 envelope without
/// invoking the handler.
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService { service }))
    }
}

pub struct AuthGateService<S> {
    service: S,
}

impl<S> AuthGateService<S> {
    /// Builds the short-circuit response for a request the gate rejects.
    fn reject<B: 'static>(
        req: ServiceRequest,
        app_err: AppError,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let (req, _payload) = req.into_parts();
        let response = app_err.error_response().map_into_right_body();
        Box::pin(async move { Ok(ServiceResponse::new(req, response)) })
    }
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Skip authentication for the index route and the credential endpoints.
        let path = req.path();
        if path == "/" || path == "/health" || path == "/users/sign-up" || path == "/users/sign-in"
        {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let tokens = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.tokens.clone(),
            None => {
                return Self::reject(
                    req,
                    AppError::Internal("application state is not configured".to_string()),
                );
            }
        };

        // An absent cookie or segment degrades to the empty token, which can
        // never verify.
        let token = req
            .headers()
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(token_from_cookie_header)
            .unwrap_or("");

        match tokens.verify(token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(app_err) => Self::reject(req, app_err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_found_among_other_cookies() {
        assert_eq!(
            token_from_cookie_header("foo=bar; task_app_token=XYZ"),
            Some("XYZ")
        );
        assert_eq!(
            token_from_cookie_header("task_app_token=XYZ;foo=bar"),
            Some("XYZ")
        );
        assert_eq!(
            token_from_cookie_header("  task_app_token=XYZ  "),
            Some("XYZ")
        );
    }

    #[test]
    fn test_missing_segment_yields_none() {
        assert_eq!(token_from_cookie_header("foo=bar; baz=qux"), None);
        assert_eq!(token_from_cookie_header(""), None);
    }

    #[test]
    fn test_empty_value_is_kept_as_empty() {
        // "task_app_token=" carries the empty token, which verification will
        // reject downstream.
        assert_eq!(token_from_cookie_header("task_app_token="), Some(""));
    }
}
