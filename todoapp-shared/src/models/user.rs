//! User model and database operations
//!
//! Users register themselves, log in with username and password, and own
//! todos. Accounts are never hard-deleted; the only mutations after
//! registration are password changes and phone number updates.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id BIGSERIAL PRIMARY KEY,
//!     email VARCHAR(200) NOT NULL UNIQUE,
//!     username VARCHAR(50) NOT NULL UNIQUE,
//!     first_name VARCHAR(50) NOT NULL,
//!     last_name VARCHAR(50) NOT NULL,
//!     hashed_password VARCHAR(200) NOT NULL,
//!     is_active BOOLEAN NOT NULL DEFAULT TRUE,
//!     role VARCHAR(10) NOT NULL DEFAULT 'user',
//!     phone_number VARCHAR(15)
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

const USER_COLUMNS: &str =
    "id, email, username, first_name, last_name, hashed_password, is_active, role, phone_number";

/// Account role
///
/// Stored as lowercase text in `users.role`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account, sees only its own todos
    #[default]
    User,

    /// Can list and delete every todo
    Admin,
}

impl Role {
    /// Converts role to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for role strings outside the known set
#[derive(Debug, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    /// Unique across all users
    pub email: String,

    /// Unique across all users, used to log in
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// Argon2id hash in PHC string format, never serialized
    #[serde(skip_serializing, default)]
    pub hashed_password: String,

    pub is_active: bool,

    #[sqlx(try_from = "String")]
    pub role: Role,

    pub phone_number: Option<String>,
}

/// Input for registering a new user
///
/// `hashed_password` must already be hashed; plaintext never reaches this layer.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: String,
    pub role: Role,
    pub phone_number: Option<String>,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Returns a database error carrying the violated constraint if the
    /// username or email is already taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (email, username, first_name, last_name, hashed_password, role, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.email)
            .bind(data.username)
            .bind(data.first_name)
            .bind(data.last_name)
            .bind(data.hashed_password)
            .bind(data.role.as_str())
            .bind(data.phone_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds the user a token was issued for
    ///
    /// Both the id and the role must match, so a token minted before a role
    /// change no longer resolves.
    pub async fn find_by_id_and_role(
        pool: &PgPool,
        id: i64,
        role: Role,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND role = $2");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Checks whether a username or email is already registered
    pub async fn exists_with_username_or_email(
        pool: &PgPool,
        username: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Replaces the stored password hash
    ///
    /// Returns false if the user doesn't exist.
    pub async fn update_password(
        pool: &PgPool,
        id: i64,
        hashed_password: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET hashed_password = $2 WHERE id = $1")
            .bind(id)
            .bind(hashed_password)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces the stored phone number
    ///
    /// Returns false if the user doesn't exist.
    pub async fn update_phone_number(
        pool: &PgPool,
        id: i64,
        phone_number: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET phone_number = $2 WHERE id = $1")
            .bind(id)
            .bind(phone_number)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
