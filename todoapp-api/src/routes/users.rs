//! The caller's own profile
//!
//! # Endpoints
//!
//! - `GET /api/users/logged-in` - Current user record
//! - `PUT /api/users/change-password` - Change password, given the old one
//! - `PUT /api/users/phone-number` - Replace the phone number
//!
//! Each endpoint resolves the caller by id and the role claimed in the token.
//! A token whose user no longer matches answers `401 "Not Authenticated!"`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use todoapp_shared::{
    auth::{middleware::AuthContext, password},
    models::user::User,
};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,

    #[validate(length(
        min = 6,
        max = 16,
        message = "New password must be 6 to 16 characters"
    ))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePhoneNumberRequest {
    #[validate(length(min = 10, max = 15, message = "Phone number must be 10 to 15 characters"))]
    pub phone_number: String,
}

async fn current_user(state: &AppState, auth: &AuthContext) -> ApiResult<User> {
    User::find_by_id_and_role(&state.db, auth.user_id, auth.role)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not Authenticated!".to_string()))
}

pub async fn get_logged_in_user(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<User>> {
    current_user(&state, &auth).await.map(Json)
}

/// Changes the caller's password
///
/// # Errors
///
/// - `409 Conflict`: `old_password` doesn't match; the stored hash is untouched
/// - `422 Unprocessable Entity`: New password outside 6 to 16 characters
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    let user = current_user(&state, &auth).await?;

    if !password::verify_password(&req.old_password, &user.hashed_password)? {
        tracing::debug!(user_id = user.id, "Password change with wrong old password");
        return Err(ApiError::Conflict("Old password mismatched".to_string()));
    }

    let hashed_password = password::hash_password(&req.new_password)?;
    User::update_password(&state.db, user.id, &hashed_password).await?;

    tracing::info!(user_id = user.id, "Changed password");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_phone_number(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<UpdatePhoneNumberRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    let user = current_user(&state, &auth).await?;
    User::update_phone_number(&state.db, user.id, &req.phone_number).await?;

    tracing::info!(user_id = user.id, "Updated phone number");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todoapp_shared::auth::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_new_password_bounds() {
        let req = |new: &str| ChangePasswordRequest {
            old_password: "test1234".to_string(),
            new_password: new.to_string(),
        };

        assert!(req("test1234!").validate().is_ok());
        assert!(req(&"x".repeat(MIN_PASSWORD_LENGTH)).validate().is_ok());
        assert!(req(&"x".repeat(MIN_PASSWORD_LENGTH - 1)).validate().is_err());
        assert!(req(&"x".repeat(MAX_PASSWORD_LENGTH + 1)).validate().is_err());
    }

    #[test]
    fn test_phone_number_bounds() {
        let req = |phone: &str| UpdatePhoneNumberRequest {
            phone_number: phone.to_string(),
        };

        assert!(req("+923131126908").validate().is_ok());
        assert!(req("12345").validate().is_err());
        assert!(req("+1234567890123456").validate().is_err());
    }
}
