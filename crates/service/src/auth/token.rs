use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::user::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthError;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }
}

/// HS256 signer/verifier for session tokens.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Token for `user_id` valid for the configured lifetime from now.
    pub fn issue(&self, user_id: Uuid, role: UserRole) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let exp = iat + self.ttl.as_secs() as i64;
        self.sign(&SessionClaims { user_id, role, iat, exp })
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Signature and expiry check. Any failure maps to `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}
