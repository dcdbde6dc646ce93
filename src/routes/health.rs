use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Index route, public.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Task app backend")
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
