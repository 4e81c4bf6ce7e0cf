use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::TokenError;

/// JWT claims: the token carries only the issuing user's id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and validates the bearer tokens handed out at registration/login.
pub struct TokenService {
    secret: String,
    expire_days: i64,
}

impl TokenService {
    pub fn new(secret: String, expire_days: i64) -> Self {
        Self { secret, expire_days }
    }

    /// Generate a signed token for the given user id.
    pub fn generate(&self, user_id: i32) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.expire_days * 24 * 60 * 60,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// Validate a token and resolve the issuing user's id.
    pub fn authorize(&self, token: &str) -> Result<i32, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        data.claims.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("expire_days", &self.expire_days)
            .finish()
    }
}
