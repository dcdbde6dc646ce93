use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Represents the claims encoded within an issued token.
///
/// Everything outside this module treats the token itself as opaque; only the
/// claims are meaningful, and only after verification.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's identity id, as an opaque string.
    pub sub: String,
    /// Email of the user at issuance time.
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Signs and verifies bearer tokens for a single shared secret.
///
/// The secret is injected at construction (from [`crate::config::Config`])
/// rather than read from the environment on every call, so the service can be
/// handed to the application state and to tests as a plain value.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issues a token embedding `{sub, email}`, valid for 24 hours.
    pub fn sign(&self, user_id: &str, email: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::hours(TOKEN_LIFETIME_HOURS))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Verification is all-or-nothing: a malformed token, a signature
    /// mismatch, or an expired `exp` all yield `AppError::Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_sign_and_verify_roundtrip() {
        let service = TokenService::new("test_secret_for_sign_verify");
        let token = service.sign("user-42", "test@example.com").unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new("test_secret_for_expiration");

        let expiration = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "test@example.com".to_string(),
            exp: expiration,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        match service.verify(&expired_token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("ExpiredSignature"), "unexpected reason: {}", msg);
            }
            Ok(_) => panic!("expired token should not verify"),
            Err(e) => panic!("unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new("secret_one");
        let verifier = TokenService::new("secret_two");

        let token = issuer.sign("user-1", "test@example.com").unwrap();
        match verifier.verify(&token) {
            Err(AppError::Unauthorized(_)) => {}
            Ok(_) => panic!("token signed with another secret should not verify"),
            Err(e) => panic!("unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = TokenService::new("secret");
        assert!(matches!(
            service.verify("not.a.token"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(service.verify(""), Err(AppError::Unauthorized(_))));
    }
}
