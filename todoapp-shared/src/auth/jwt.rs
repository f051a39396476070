//! JWT access tokens
//!
//! Tokens are signed with HS256 using the server's shared secret and carry
//! who the caller is (`sub` = username, `id` = user id) and what they may do
//! (`role`). Both the API bearer header and the browser cookie carry the same
//! token format, and both go through [`validate_token`].
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use todoapp_shared::auth::jwt::{issue_token, validate_token};
//! use todoapp_shared::models::user::Role;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = "test-secret-key-at-least-32-bytes-long";
//! let token = issue_token("shahan", 1, Role::User, Duration::minutes(20), secret)?;
//!
//! let claims = validate_token(&token, secret)?;
//! assert_eq!(claims.sub, "shahan");
//! assert_eq!(claims.id, 1);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Bad signature, malformed token, or unreadable payload
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A required identity claim is absent
    #[error("Token is missing the `{0}` claim")]
    MissingClaim(&'static str),
}

/// Validated token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username
    pub sub: String,

    /// User ID
    pub id: i64,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Payload as decoded, before the identity claims are checked for presence
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    id: Option<i64>,
    role: Option<Role>,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

impl TryFrom<RawClaims> for Claims {
    type Error = JwtError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            sub: raw.sub.ok_or(JwtError::MissingClaim("sub"))?,
            id: raw.id.ok_or(JwtError::MissingClaim("id"))?,
            role: raw.role.ok_or(JwtError::MissingClaim("role"))?,
            iat: raw.iat,
            exp: raw.exp,
        })
    }
}

impl Claims {
    /// Creates claims expiring `expires_in` from now
    pub fn new(username: impl Into<String>, user_id: i64, role: Role, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: username.into(),
            id: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

/// Signs claims into a token string
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Builds and signs a token for a user in one step
pub fn issue_token(
    username: &str,
    user_id: i64,
    role: Role,
    ttl: Duration,
    secret: &str,
) -> Result<String, JwtError> {
    create_token(&Claims::new(username, user_id, role, ttl), secret)
}

/// Verifies signature and expiry, then extracts the identity claims
///
/// # Errors
///
/// - `JwtError::Expired` if `exp` is in the past
/// - `JwtError::MissingClaim` if `sub`, `id`, or `role` is absent
/// - `JwtError::InvalidToken` for anything else (bad signature, no `exp`, garbage)
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);
    validation.validate_exp = true;

    let token_data = decode::<RawClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::InvalidToken(e.to_string()),
    })?;

    token_data.claims.try_into()
}
