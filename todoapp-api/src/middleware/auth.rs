//! Authentication middleware
//!
//! Both layers run the same [`authenticate_request`] check, which accepts a
//! bearer header or the `access_token` cookie, and store the resulting
//! [`AuthContext`] in the request extensions. They differ only in how they
//! turn away an anonymous caller:
//!
//! - [`api_auth_layer`] answers `401` with a JSON `detail`
//! - [`session_auth_layer`] redirects the browser to `/login`

use crate::{app::AppState, error::ApiError, routes::found};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use todoapp_shared::auth::middleware::{authenticate_request, AuthContext};

/// Authentication layer for the JSON API
pub async fn api_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth: AuthContext = authenticate_request(req.headers(), state.jwt_secret())?;

    tracing::debug!(user_id = auth.user_id, method = ?auth.method, "Authenticated API request");
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}

/// Authentication layer for the browser pages
pub async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate_request(req.headers(), state.jwt_secret()) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, path = %req.uri().path(), "Redirecting to login");
            found("/login").into_response()
        }
    }
}
