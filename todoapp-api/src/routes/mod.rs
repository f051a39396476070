//! API route handlers
//!
//! Organized by resource:
//!
//! - `health`: Health check endpoint
//! - `auth`: Registration and token issue (`/api/auth`)
//! - `todos`: The caller's own todos (`/api/todos`)
//! - `admin`: Cross-user todo access for admins (`/api/admins`)
//! - `users`: The caller's profile (`/api/users`)
//! - `web`: Cookie-session form endpoints used by the browser

pub mod admin;
pub mod auth;
pub mod health;
pub mod todos;
pub mod users;
pub mod web;

use crate::error::{ApiError, ApiResult};
use axum::http::{header, StatusCode};

/// `302 Found` redirect
///
/// `axum::response::Redirect` only offers 303/307/308; browsers following a
/// form post expect 302.
pub fn found(location: &'static str) -> (StatusCode, [(header::HeaderName, &'static str); 1]) {
    (StatusCode::FOUND, [(header::LOCATION, location)])
}

/// Rejects non-positive record ids from the path
pub fn positive_id(field: &str, id: i64) -> ApiResult<i64> {
    if id <= 0 {
        return Err(ApiError::invalid_field(field, "Id must be greater than 0"));
    }

    Ok(id)
}
