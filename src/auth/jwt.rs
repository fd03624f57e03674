use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    /// Destination tag, e.g. "Login"
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encode(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Result of the expiry check, kept apart from signature verification.
#[derive(Debug, Clone)]
pub struct Expiry {
    pub expired: bool,
    pub payload: TokenPayload,
}

/// Sign an HS256 token that expires `ttl` after `now`.
pub fn create_token(
    id: Uuid,
    username: &str,
    subject: &str,
    ttl: Duration,
    now: DateTime<Utc>,
    secret: &str,
) -> Result<String, TokenError> {
    let iat = now.timestamp();
    let payload = TokenPayload {
        id,
        username: username.to_string(),
        sub: subject.to_string(),
        iat,
        exp: iat + ttl.num_seconds(),
    };

    encode(
        &Header::new(ALGORITHM),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Check signature, algorithm and shape. Expiry is left to `check_expiry`.
pub fn verify_token(token: &str, secret: &str) -> Result<TokenPayload, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<TokenPayload>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Invalid(e.to_string()))
}

pub fn check_expiry(payload: TokenPayload, now: DateTime<Utc>) -> Expiry {
    Expiry {
        expired: now.timestamp() > payload.exp,
        payload,
    }
}
