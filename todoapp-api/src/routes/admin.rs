//! Admin endpoints
//!
//! # Endpoints
//!
//! - `GET    /api/admins/todos` - List every user's todos
//! - `DELETE /api/admins/todos/:todo_id` - Delete any todo
//!
//! Callers without the admin role get `401 {"detail": "Authentication failed!"}`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path},
    routes::positive_id,
};
use axum::{extract::State, http::StatusCode};
use todoapp_shared::{
    auth::{authorization::require_role, middleware::AuthContext},
    models::{todo::Todo, user::Role},
};

pub async fn list_all_todos(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<Todo>>> {
    require_role(&auth, Role::Admin)?;

    let todos = Todo::list_all(&state.db).await?;
    Ok(Json(todos))
}

pub async fn delete_any_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
) -> ApiResult<StatusCode> {
    require_role(&auth, Role::Admin)?;
    let todo_id = positive_id("todo_id", todo_id)?;

    if !Todo::delete(&state.db, todo_id).await? {
        return Err(ApiError::todo_not_found());
    }

    tracing::info!(todo_id, admin_id = auth.user_id, "Admin deleted todo");

    Ok(StatusCode::NO_CONTENT)
}
