//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the error conditions that can occur, from store failures to
//! validation failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` so that handler (and
//! middleware) errors are converted into the uniform JSON envelope
//! `{"success": false, "code": <status>, "message": <text>}` used by every
//! endpoint. Note one deliberate convention inherited from the API contract:
//! "not found" conditions are reported as `BadRequest` (HTTP 400), not 404.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, carrying a message
/// detailing the issue. These errors are converted into HTTP responses with
/// the uniform `{success, code, message}` body.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid client input, and missing records (HTTP 400).
    BadRequest(String),
    /// Authentication failed or is missing (HTTP 401).
    ///
    /// The payload is kept for logging; the response body always carries the
    /// fixed message "Authentication required" so that callers cannot
    /// distinguish a missing cookie from a bad token.
    Unauthorized(String),
    /// The caller is authenticated but does not own the resource (HTTP 403).
    Forbidden(String),
    /// A unique-key conflict, e.g. duplicate email on sign-up (HTTP 409).
    Conflict(String),
    /// An unexpected server-side or store failure (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
            AppError::Unauthorized(_) => "Authentication required",
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation lets Actix Web translate `AppError` results from
/// handlers into the correct HTTP status codes and JSON envelope.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        HttpResponse::build(code).json(json!({
            "success": false,
            "code": code.as_u16(),
            "message": self.message(),
        }))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
