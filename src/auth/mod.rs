pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::Deserialize;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthGate;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Payload for `POST /users/sign-up`.
///
/// Every field is optional at the wire level so that missing input reaches
/// the credential verifier (and produces the structured 400 body) instead of
/// failing JSON deserialization.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Payload for `POST /users/sign-in`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_tolerates_missing_fields() {
        let request: SignUpRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_none());
        assert!(request.password.is_none());
        assert!(request.name.is_none());

        let request: SignUpRequest =
            serde_json::from_str(r#"{"email":"a@ebx.com","password":"Strong1!","name":"N"}"#)
                .unwrap();
        assert_eq!(request.email.as_deref(), Some("a@ebx.com"));
        assert_eq!(request.name.as_deref(), Some("N"));
    }

    #[test]
    fn test_sign_in_request_tolerates_missing_fields() {
        let request: SignInRequest = serde_json::from_str(r#"{"email":"a@ebx.com"}"#).unwrap();
        assert_eq!(request.email.as_deref(), Some("a@ebx.com"));
        assert!(request.password.is_none());
    }
}
