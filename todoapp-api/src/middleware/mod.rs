//! Middleware for the API server
//!
//! - `auth`: Resolves the caller from a bearer header or session cookie
//! - `security`: Security response headers

pub mod auth;
pub mod security;
