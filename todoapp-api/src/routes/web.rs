//! Browser endpoints backed by the `access_token` cookie
//!
//! These serve the HTML forms of the web front end. They take form posts,
//! keep the session in an HttpOnly cookie, and answer with `302 Found`
//! redirects instead of JSON.
//!
//! # Endpoints
//!
//! Public:
//!
//! - `POST /token` - Form login that only sets the cookie
//! - `POST /login` - Form login, then redirect to `/`
//! - `GET  /logout` - Clear the cookie, then redirect to `/login`
//! - `POST /register` - Create an account, then redirect to `/login`
//!
//! Behind the session layer (anonymous browsers go to `/login`):
//!
//! - `GET  /` - The caller's todos
//! - `POST /add-todo`
//! - `POST /edit-todo/:todo_id`
//! - `GET  /delete-todo/:todo_id`
//! - `GET  /complete-todo/:todo_id` - Toggle completion
//! - `POST /change-password`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Form, Json, Path},
    routes::{found, positive_id},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use todoapp_shared::{
    auth::{
        credentials::authenticate,
        jwt,
        middleware::{authenticate_request, AuthContext, AuthError},
        password::{self, MIN_PASSWORD_LENGTH},
        session::{removal_cookie, session_cookie},
    },
    models::{
        todo::{Todo, TodoFields},
        user::{CreateUser, Role, User},
    },
};
use validator::Validate;

/// Login form; the field named `email` carries the username
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "email")]
    pub username: String,
    pub password: String,
}

/// OAuth2-style password form
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// Browser sign-up form; lengths follow the `users` column limits
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 200))]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    /// Blank means no phone number
    #[serde(default)]
    #[validate(length(max = 15))]
    pub phone_number: String,
    pub password: String,
    pub password2: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TodoForm {
    #[validate(length(min = 3, max = 50, message = "Title must be 3 to 50 characters"))]
    pub title: String,

    #[validate(length(min = 3, max = 100, message = "Description must be 3 to 100 characters"))]
    pub description: String,

    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: i32,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub password: String,
    pub password2: String,
}

fn is_signed_in(state: &AppState, headers: &HeaderMap) -> bool {
    authenticate_request(headers, state.jwt_secret()).is_ok()
}

/// Checks the credentials and builds the session cookie header
async fn start_session(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<[(header::HeaderName, String); 1], AuthError> {
    let user = authenticate(&state.db, username, password).await?;

    let token = jwt::issue_token(
        &user.username,
        user.id,
        user.role,
        state.config.jwt.cookie_token_ttl(),
        state.jwt_secret(),
    )?;

    tracing::info!(user_id = user.id, "Started browser session");

    let cookie = session_cookie(token, state.config.api.production);
    Ok([(header::SET_COOKIE, cookie.to_string())])
}

pub async fn token(State(state): State<AppState>, Form(form): Form<TokenForm>) -> Response {
    match start_session(&state, &form.username, &form.password).await {
        Ok(set_cookie) => (set_cookie, Json(true)).into_response(),
        Err(AuthError::InvalidCredentials) => (StatusCode::UNAUTHORIZED, Json(false)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    if is_signed_in(&state, &headers) {
        return Ok(found("/").into_response());
    }

    match start_session(&state, &form.username, &form.password).await {
        Ok(set_cookie) => Ok((set_cookie, found("/")).into_response()),
        Err(AuthError::InvalidCredentials) => Err(ApiError::Unauthorized(
            "Incorrect username or password!".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, removal_cookie().to_string())],
        found("/login"),
    )
        .into_response()
}

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> ApiResult<Response> {
    if is_signed_in(&state, &headers) {
        return Ok(found("/").into_response());
    }

    let invalid = || ApiError::BadRequest("Invalid registration request".to_string());

    if form.password != form.password2 {
        return Err(invalid());
    }

    if let Err(err) = form.validate() {
        tracing::debug!(error = %err, "Rejected browser registration");
        return Err(invalid());
    }

    if User::exists_with_username_or_email(&state.db, &form.username, &form.email).await? {
        return Err(invalid());
    }

    let hashed_password = password::hash_password(&form.password)?;
    let phone_number = Some(form.phone_number).filter(|p| !p.trim().is_empty());

    let user = User::create(
        &state.db,
        CreateUser {
            email: form.email,
            username: form.username,
            first_name: form.first_name,
            last_name: form.last_name,
            hashed_password,
            role: Role::User,
            phone_number,
        },
    )
    .await
    .map_err(|err| match ApiError::from(err) {
        ApiError::Conflict(_) => invalid(),
        other => other,
    })?;

    tracing::info!(user_id = user.id, "Registered user from browser");

    Ok(found("/login").into_response())
}

pub async fn home(State(state): State<AppState>, auth: AuthContext) -> ApiResult<Json<Vec<Todo>>> {
    let todos = Todo::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(todos))
}

pub async fn add_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Form(form): Form<TodoForm>,
) -> ApiResult<Response> {
    form.validate()?;

    let todo = Todo::create(
        &state.db,
        auth.user_id,
        TodoFields {
            title: form.title,
            description: form.description,
            priority: form.priority,
            complete: false,
        },
    )
    .await?;

    tracing::info!(todo_id = todo.id, owner_id = auth.user_id, "Created todo");

    Ok(found("/").into_response())
}

pub async fn edit_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
    Form(form): Form<TodoForm>,
) -> ApiResult<Response> {
    let todo_id = positive_id("todo_id", todo_id)?;
    form.validate()?;

    Todo::update_details_owned(
        &state.db,
        todo_id,
        auth.user_id,
        &form.title,
        &form.description,
        form.priority,
    )
    .await?
    .ok_or_else(ApiError::todo_not_found)?;

    Ok(found("/").into_response())
}

/// Deletes an owned todo; a missing one still redirects home
pub async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
) -> ApiResult<Response> {
    let todo_id = positive_id("todo_id", todo_id)?;

    if !Todo::delete_owned(&state.db, todo_id, auth.user_id).await? {
        tracing::debug!(todo_id, owner_id = auth.user_id, "Nothing to delete");
    }

    Ok(found("/").into_response())
}

pub async fn complete_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
) -> ApiResult<Response> {
    let todo_id = positive_id("todo_id", todo_id)?;

    Todo::toggle_complete_owned(&state.db, todo_id, auth.user_id)
        .await?
        .ok_or_else(ApiError::todo_not_found)?;

    Ok(found("/").into_response())
}

/// Checks a change-password form before anything is hashed
///
/// Returns the message to show the user on failure.
fn check_new_password(form: &ChangePasswordForm) -> Result<(), &'static str> {
    if form.password != form.password2 {
        return Err("Confirm password mismatched");
    }

    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("New password must be at least six characters long");
    }

    Ok(())
}

pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthContext,
    Form(form): Form<ChangePasswordForm>,
) -> ApiResult<Response> {
    let Some(user) = User::find_by_id(&state.db, auth.user_id).await? else {
        return Ok((
            [(header::SET_COOKIE, removal_cookie().to_string())],
            found("/login"),
        )
            .into_response());
    };

    if !password::verify_password(&form.old_password, &user.hashed_password)? {
        return Err(ApiError::BadRequest("Password mismatched".to_string()));
    }

    check_new_password(&form).map_err(|msg| ApiError::BadRequest(msg.to_string()))?;

    if password::verify_password(&form.password, &user.hashed_password)? {
        return Err(ApiError::BadRequest(
            "You haven't changed the password".to_string(),
        ));
    }

    let hashed_password = password::hash_password(&form.password)?;
    User::update_password(&state.db, user.id, &hashed_password).await?;

    tracing::info!(user_id = user.id, "Changed password from browser");

    Ok(found("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(password: &str, password2: &str) -> ChangePasswordForm {
        ChangePasswordForm {
            old_password: "test1234".to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
        }
    }

    #[test]
    fn test_check_new_password() {
        assert!(check_new_password(&change("newpass1", "newpass1")).is_ok());
        assert_eq!(
            check_new_password(&change("newpass1", "newpass2")),
            Err("Confirm password mismatched")
        );
        assert!(check_new_password(&change("abc", "abc")).is_err());
    }

    fn signup_form(username: &str, phone_number: &str) -> RegisterForm {
        RegisterForm {
            email: "shahan@example.com".to_string(),
            username: username.to_string(),
            first_name: "Shahan".to_string(),
            last_name: "Test".to_string(),
            phone_number: phone_number.to_string(),
            password: "test1234".to_string(),
            password2: "test1234".to_string(),
        }
    }

    #[test]
    fn test_register_form_column_limits() {
        assert!(signup_form("shahan", "").validate().is_ok());
        assert!(signup_form("shahan", "+923131126908").validate().is_ok());
        assert!(signup_form("shahan", "1234567890123456").validate().is_err());
        assert!(signup_form(&"u".repeat(51), "").validate().is_err());
        assert!(signup_form("", "").validate().is_err());
    }

    #[test]
    fn test_login_form_reads_username_from_email_field() {
        let form: LoginForm = serde_json::from_value(serde_json::json!({
            "email": "shahan",
            "password": "test1234",
        }))
        .unwrap();

        assert_eq!(form.username, "shahan");
    }
}
