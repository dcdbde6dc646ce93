use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

use crate::auth::{hash_password, verify_password, AuthenticatedUser, SignInRequest, SignUpRequest};
use crate::error::AppError;
use crate::models::NewUser;
use crate::state::AppState;
use crate::store::StoreError;
use crate::validation::{is_strong_password, is_valid_email};

/// Sign up a new user
///
/// Validates the credentials, hashes the password, persists the user, and
/// returns a fresh token. A duplicate email surfaces as 409; any other store
/// failure as 500 with the underlying message.
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<AppState>,
    payload: web::Json<SignUpRequest>,
) -> Result<impl Responder, AppError> {
    let email = payload.email.as_deref().unwrap_or("");
    if !is_valid_email(email) {
        return Err(AppError::BadRequest("Email is missing or invalid.".into()));
    }

    let password = payload.password.as_deref().unwrap_or("");
    if !is_strong_password(password) {
        return Err(AppError::BadRequest("Weak password.".into()));
    }

    let password_hash = hash_password(password, state.bcrypt_cost)?;
    let new_user = NewUser {
        email: email.to_string(),
        password_hash,
        name: payload.name.clone().unwrap_or_default(),
    };

    let user = match state.users.insert(new_user).await {
        Ok(user) => user,
        Err(StoreError::Conflict) => {
            return Err(AppError::Conflict("Email already exists.".into()));
        }
        Err(StoreError::Backend(msg)) => {
            log::error!("user store insert failed: {}", msg);
            return Err(AppError::Internal(msg));
        }
    };

    let token = state.tokens.sign(&user.id.to_string(), &user.email)?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User created successfully",
        "token": token,
    })))
}

/// Sign in an existing user
///
/// An unknown email and a wrong password produce the same 400 message so the
/// response does not reveal which half was wrong.
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<AppState>,
    payload: web::Json<SignInRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Email and password are required.".into(),
            ));
        }
    };

    let user = state.users.find_by_email(email).await.map_err(|err| {
        log::error!("user store lookup failed: {}", err);
        AppError::Internal(err.to_string())
    })?;

    let user = match user {
        Some(user) => user,
        None => return Err(AppError::BadRequest("Invalid email or password.".into())),
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::BadRequest("Invalid email or password.".into()));
    }

    let token = state.tokens.sign(&user.id.to_string(), &user.email)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "token": token,
    })))
}

/// Fetch the caller's profile
///
/// The looked-up id is the one the auth gate resolved from the token. The
/// password hash is stripped from the record by its serializer.
#[get("/me")]
pub async fn me(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = state.users.find_by_id(&caller.0).await.map_err(|err| {
        log::error!("user store lookup failed: {}", err);
        AppError::Internal(err.to_string())
    })?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "code": 200,
            "user": user,
        }))),
        None => Err(AppError::BadRequest("Profile info not found".into())),
    }
}
