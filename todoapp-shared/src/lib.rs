//! # TodoApp Shared Library
//!
//! Types, persistence, and authentication used by the TodoApp API server.
//!
//! ## Module Organization
//!
//! - `models`: Users and todos, with their database operations
//! - `db`: Connection pool and schema bootstrap
//! - `auth`: Password hashing, tokens, request authentication, authorization

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TodoApp shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
