//! Todo model and database operations
//!
//! Every todo belongs to exactly one user. Owner-facing queries always filter
//! on both `id` and `owner_id`; the unscoped variants exist for admins only.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE todos (
//!     id BIGSERIAL PRIMARY KEY,
//!     title VARCHAR(100) NOT NULL,
//!     description VARCHAR(200) NOT NULL,
//!     priority INTEGER NOT NULL DEFAULT 1,
//!     complete BOOLEAN NOT NULL DEFAULT FALSE,
//!     owner_id BIGINT NOT NULL REFERENCES users(id)
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

const TODO_COLUMNS: &str = "id, title, description, priority, complete, owner_id";

/// Lowest accepted priority
pub const MIN_PRIORITY: i32 = 1;

/// Highest accepted priority
pub const MAX_PRIORITY: i32 = 5;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,

    /// 1 (lowest) to 5 (highest)
    pub priority: i32,

    pub complete: bool,

    /// References `users.id`
    pub owner_id: i64,
}

/// The user-editable fields of a todo
///
/// Used for both creation and full replacement; validation happens at the
/// request boundary before these reach the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
}

impl Todo {
    /// Inserts a todo owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: i64,
        fields: TodoFields,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO todos (title, description, priority, complete, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TODO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(fields.title)
            .bind(fields.description)
            .bind(fields.priority)
            .bind(fields.complete)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Lists the todos owned by a user, oldest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {TODO_COLUMNS} FROM todos WHERE owner_id = $1 ORDER BY id");

        sqlx::query_as::<_, Todo>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Lists every todo regardless of owner
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id");

        sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
    }

    /// Finds a todo by id, only if `owner_id` owns it
    pub async fn find_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND owner_id = $2");

        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Replaces every editable field of an owned todo
    ///
    /// Returns the updated row, or None if the todo doesn't exist or belongs
    /// to someone else.
    pub async fn update_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        fields: TodoFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE todos
            SET title = $3, description = $4, priority = $5, complete = $6
            WHERE id = $1 AND owner_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(fields.title)
            .bind(fields.description)
            .bind(fields.priority)
            .bind(fields.complete)
            .fetch_optional(pool)
            .await
    }

    /// Edits title, description, and priority of an owned todo, keeping its
    /// completion flag
    pub async fn update_details_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        title: &str,
        description: &str,
        priority: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE todos
            SET title = $3, description = $4, priority = $5
            WHERE id = $1 AND owner_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(title)
            .bind(description)
            .bind(priority)
            .fetch_optional(pool)
            .await
    }

    /// Flips the completion flag of an owned todo
    pub async fn toggle_complete_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET complete = NOT complete WHERE id = $1 AND owner_id = $2 RETURNING {TODO_COLUMNS}"
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Deletes an owned todo
    ///
    /// Returns false if nothing matched.
    pub async fn delete_owned(pool: &PgPool, id: i64, owner_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes any todo by id
    ///
    /// Returns false if nothing matched.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
