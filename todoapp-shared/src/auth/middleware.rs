//! Request authentication
//!
//! One routine, [`authenticate_request`], turns request headers into an
//! [`AuthContext`]. It accepts the token from either delivery mechanism:
//!
//! - **Bearer**: `Authorization: Bearer <jwt>` (API clients)
//! - **Cookie**: `access_token=<jwt>` (browser sessions)
//!
//! The header wins when both are present. Either way the token goes through
//! the same [`validate_token`] check.
//!
//! The API's middleware layer stores the context in the request extensions,
//! and handlers pull it back out by taking `AuthContext` as an argument:
//!
//! ```no_run
//! use todoapp_shared::auth::middleware::AuthContext;
//!
//! async fn handler(auth: AuthContext) -> String {
//!     format!("Hello, {}!", auth.username)
//! }
//! ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::jwt::{validate_token, Claims, JwtError};
use super::password::PasswordError;
use super::session::token_from_cookies;
use crate::models::user::Role;

/// Where the token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// `Authorization: Bearer` header
    Bearer,

    /// `access_token` cookie
    Cookie,
}

/// Identity of the caller, taken from a validated token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: i64,

    pub username: String,

    /// Role as claimed in the token
    pub role: Role,

    pub method: AuthMethod,
}

impl AuthContext {
    /// Creates auth context from validated claims
    pub fn from_claims(claims: Claims, method: AuthMethod) -> Self {
        Self {
            user_id: claims.id,
            username: claims.sub,
            role: claims.role,
            method,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Neither an Authorization header nor a session cookie
    #[error("Not authenticated")]
    MissingCredentials,

    /// Authorization header present but not a bearer token
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error(transparent)]
    InvalidToken(#[from] JwtError),

    /// Unknown username or wrong password
    #[error("Not Authenticated")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored hash could not be checked
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let detail = match &self {
            AuthError::Database(_) | AuthError::Password(_) => {
                tracing::error!(error = %self, "Authentication backend failure");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response();
            }
            AuthError::InvalidCredentials => "Not Authenticated",
            AuthError::MissingCredentials => "Not authenticated",
            AuthError::InvalidFormat(_) => "Not authenticated",
            AuthError::InvalidToken(JwtError::MissingClaim(_)) => "Couldn't validate user.",
            AuthError::InvalidToken(JwtError::Expired) => "Token expired",
            AuthError::InvalidToken(_) => "Couldn't validate user.",
        };

        tracing::debug!(error = %self, "Rejected request credentials");

        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(json!({ "detail": detail })),
        )
            .into_response()
    }
}

/// Finds the raw token and how it was delivered
///
/// Returns `Ok(None)` when the request carries no credentials at all.
pub fn extract_token(headers: &HeaderMap) -> Result<Option<(String, AuthMethod)>, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidFormat("Header is not valid ASCII".to_string()))?;

        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

        return Ok(Some((token.trim().to_string(), AuthMethod::Bearer)));
    }

    Ok(token_from_cookies(headers).map(|token| (token, AuthMethod::Cookie)))
}

/// Authenticates a request from its headers
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if there is no token anywhere
/// - `AuthError::InvalidFormat` for a non-bearer Authorization header
/// - `AuthError::InvalidToken` if the token fails [`validate_token`]
pub fn authenticate_request(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let (token, method) = extract_token(headers)?.ok_or(AuthError::MissingCredentials)?;
    let claims = validate_token(&token, secret)?;

    Ok(AuthContext::from_claims(claims, method))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}
