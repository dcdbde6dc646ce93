use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::json;
use std::sync::Arc;

use taskdeck::auth::TokenService;
use taskdeck::state::AppState;
use taskdeck::store::{MemoryTaskStore, MemoryUserStore};

/// bcrypt's minimum cost factor; the bcrypt crate keeps its `MIN_COST`
/// constant private.
const MIN_COST: u32 = 4;

/// Application state over the in-memory stores. bcrypt runs at its minimum
/// cost so sign-up heavy tests stay fast.
pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState {
        users: Arc::new(MemoryUserStore::new()),
        tasks: Arc::new(MemoryTaskStore::new()),
        tokens: TokenService::new("integration-test-secret"),
        bcrypt_cost: MIN_COST,
    })
}

/// Signs up a user and returns the issued token.
pub async fn sign_up<S, B>(app: &S, email: &str, password: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/users/sign-up")
        .set_json(json!({ "email": email, "password": password, "name": name }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "sign-up failed");

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("token in sign-up response")
        .to_string()
}

/// Formats the auth cookie header value for a token.
pub fn auth_cookie(token: &str) -> String {
    format!("task_app_token={}", token)
}
