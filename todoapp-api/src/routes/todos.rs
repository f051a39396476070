//! The caller's todos
//!
//! Every query is scoped to the authenticated user; another user's todo looks
//! exactly like a missing one.
//!
//! # Endpoints
//!
//! - `GET    /api/todos` - List own todos
//! - `POST   /api/todos` - Create a todo
//! - `GET    /api/todos/:todo_id` - Get an own todo
//! - `PUT    /api/todos/:todo_id` - Replace an own todo
//! - `DELETE /api/todos/:todo_id` - Delete an own todo

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path},
    routes::positive_id,
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use todoapp_shared::{
    auth::middleware::AuthContext,
    models::todo::{Todo, TodoFields},
};
use validator::Validate;

/// Body for create and replace
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TodoRequest {
    #[validate(length(min = 3, max = 50, message = "Title must be 3 to 50 characters"))]
    pub title: String,

    #[validate(length(min = 3, max = 100, message = "Description must be 3 to 100 characters"))]
    pub description: String,

    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: i32,

    #[serde(default)]
    pub complete: bool,
}

impl From<TodoRequest> for TodoFields {
    fn from(req: TodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            priority: req.priority,
            complete: req.complete,
        }
    }
}

pub async fn list_todos(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = Todo::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(todos))
}

/// # Errors
///
/// - `404 Not Found`: No todo with this id owned by the caller
pub async fn get_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    let todo_id = positive_id("todo_id", todo_id)?;

    Todo::find_owned(&state.db, todo_id, auth.user_id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::todo_not_found)
}

/// Creates a todo owned by the caller
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Title, description, or priority out of range
pub async fn create_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<TodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    req.validate()?;

    let todo = Todo::create(&state.db, auth.user_id, req.into()).await?;

    tracing::info!(todo_id = todo.id, owner_id = auth.user_id, "Created todo");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Replaces title, description, priority, and completion of an owned todo
pub async fn update_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
    Json(req): Json<TodoRequest>,
) -> ApiResult<StatusCode> {
    let todo_id = positive_id("todo_id", todo_id)?;
    req.validate()?;

    Todo::update_owned(&state.db, todo_id, auth.user_id, req.into())
        .await?
        .ok_or_else(ApiError::todo_not_found)?;

    tracing::info!(todo_id, owner_id = auth.user_id, "Updated todo");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let todo_id = positive_id("todo_id", todo_id)?;

    if !Todo::delete_owned(&state.db, todo_id, auth.user_id).await? {
        return Err(ApiError::todo_not_found());
    }

    tracing::info!(todo_id, owner_id = auth.user_id, "Deleted todo");

    Ok(StatusCode::NO_CONTENT)
}
