//! Database models for TodoApp
//!
//! Each model owns its SQL: the structs derive `sqlx::FromRow` and expose
//! associated async functions taking a `&PgPool`.
//!
//! # Models
//!
//! - `user`: Accounts, roles, and credentials
//! - `todo`: To-do items, each owned by one user

pub mod todo;
pub mod user;
