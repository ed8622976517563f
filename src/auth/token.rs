use crate::error::AppError;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// How long an issued token stays valid.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Email of the authenticated user.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues a token for `email`, valid for 24 hours from now.
pub fn generate_token(email: &str, secret: &str) -> Result<String, AppError> {
    generate_token_at(email, secret, Utc::now())
}

/// Issues a token as if it had been created at `issued_at`.
pub fn generate_token_at(
    email: &str,
    secret: &str,
    issued_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let expiration = issued_at
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::InternalServerError("token expiry out of range".into()))?;

    let claims = Claims {
        sub: email.to_string(),
        iat: issued_at.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies signature and expiry of `token` and returns its claims.
///
/// Returns `AppError::Unauthorized` if the token is malformed, signed with a
/// different secret, or expired.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
