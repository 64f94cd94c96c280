//! JWT issuing and verification.
//!
//! Tokens are HS256-signed with a shared secret and carry the user's id and email.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::User;
use crate::error::AppError;

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (UUID string)
    pub id: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_seconds: i64,
}

impl JwtService {
    /// Creates a JWT service for the given secret and token lifetime.
    pub fn new(secret: &str, expiration_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_seconds,
        }
    }

    /// Issues a token for the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiration_seconds)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode JWT");
            AppError::internal("Failed to issue token", json!({}))
        })
    }

    /// Verifies the signature and expiry of a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for any malformed, forged or expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                AppError::unauthorized("Invalid token", json!({ "reason": e.to_string() }))
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_seconds", &self.expiration_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fixtures;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900)
    }

    #[test]
    fn test_issue_and_verify() {
        let user = fixtures::user("keks@htmlacademy.ru");
        let token = service().issue(&user).unwrap();

        let claims = service().verify(&token).unwrap();
        assert_eq!(claims.id, user.id.to_string());
        assert_eq!(claims.email, "keks@htmlacademy.ru");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let user = fixtures::user("a@b.io");
        let token = JwtService::new("another-secret", 900).issue(&user).unwrap();

        let err = service().verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let user = fixtures::user("a@b.io");
        let token = JwtService::new("test-secret-key-that-is-long-enough", -3600)
            .issue(&user)
            .unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains("test-secret"));
    }
}
