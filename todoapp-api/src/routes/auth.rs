//! Registration and token endpoints
//!
//! # Endpoints
//!
//! - `POST /api/auth` - Register a new user (JSON)
//! - `POST /api/auth/token` - Exchange username and password for a bearer token (form)

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Form, Json},
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use todoapp_shared::{
    auth::{credentials::authenticate, jwt, password},
    models::user::{CreateUser, Role, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"), length(max = 200))]
    pub email: String,

    #[validate(length(min = 1, max = 50, message = "Username must be 1 to 50 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: String,

    /// Plaintext password; older clients send it as `hashed_password`
    #[serde(alias = "hashed_password")]
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,

    #[serde(default)]
    pub role: Role,

    #[validate(length(min = 10, max = 15, message = "Phone number must be 10 to 15 characters"))]
    pub phone_number: Option<String>,
}

/// Token request, sent as `application/x-www-form-urlencoded`
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Registers a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth
/// Content-Type: application/json
///
/// {
///   "email": "shahan@example.com",
///   "username": "shahan",
///   "first_name": "Shahan",
///   "last_name": "Test",
///   "password": "test1234",
///   "role": "admin",
///   "phone_number": "1111111111"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username or email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let hashed_password = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            hashed_password,
            role: req.role,
            phone_number: req.phone_number,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "Registered user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Issues a bearer token
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/token
/// Content-Type: application/x-www-form-urlencoded
///
/// username=shahan&password=test1234
/// ```
///
/// # Response
///
/// ```json
/// { "access_token": "eyJ...", "token_type": "bearer" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username or wrong password
pub async fn token(
    State(state): State<AppState>,
    Form(req): Form<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = authenticate(&state.db, &req.username, &req.password).await?;

    let access_token = jwt::issue_token(
        &user.username,
        user.id,
        user.role,
        state.config.jwt.access_token_ttl(),
        state.jwt_secret(),
    )?;

    tracing::info!(user_id = user.id, "Issued access token");

    Ok(Json(TokenResponse::bearer(access_token)))
}
