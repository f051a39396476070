//! Database layer for TodoApp
//!
//! - `pool`: PostgreSQL connection pool with health check
//! - `schema`: Creates the tables at startup
//!
//! Models live in the crate-level `models` module.

pub mod pool;
pub mod schema;
