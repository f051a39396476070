//! Authentication and authorization
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and verification
//! - [`jwt`]: Access token signing and validation
//! - [`session`]: The `access_token` browser cookie
//! - [`middleware`]: Token extraction and the request [`middleware::AuthContext`]
//! - [`credentials`]: Username/password login
//! - [`authorization`]: Role and ownership checks
//!
//! # Example
//!
//! ```no_run
//! use chrono::Duration;
//! use todoapp_shared::auth::jwt::{issue_token, validate_token};
//! use todoapp_shared::auth::password::{hash_password, verify_password};
//! use todoapp_shared::models::user::Role;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("user_password")?;
//! assert!(verify_password("user_password", &hash)?);
//!
//! let token = issue_token("shahan", 1, Role::User, Duration::minutes(20), "secret-key")?;
//! let claims = validate_token(&token, "secret-key")?;
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod session;
