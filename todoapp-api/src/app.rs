//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use todoapp_api::{app::AppState, config::Config};
//! use sqlx::PgPool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = PgPool::connect(&config.database.url).await?;
//! let state = AppState::new(pool, config);
//! let app = todoapp_api::app::build_router(state);
//! # Ok(())
//! # }
//! ```

use crate::{
    config::Config,
    middleware::{
        auth::{api_auth_layer, session_auth_layer},
        security::SecurityHeadersLayer,
    },
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /healthy                        # Health check (public)
/// ├── /api/
/// │   ├── /auth/                          # Public
/// │   │   ├── POST /                      # Register
/// │   │   └── POST /token                 # Bearer token
/// │   ├── /todos/                         # Bearer or cookie
/// │   │   ├── GET    /
/// │   │   ├── POST   /
/// │   │   ├── GET    /:todo_id
/// │   │   ├── PUT    /:todo_id
/// │   │   └── DELETE /:todo_id
/// │   ├── /admins/                        # Bearer or cookie, admin role
/// │   │   ├── GET    /todos
/// │   │   └── DELETE /todos/:todo_id
/// │   └── /users/                         # Bearer or cookie
/// │       ├── GET /logged-in
/// │       ├── PUT /change-password
/// │       └── PUT /phone-number
/// ├── POST /token, POST /login, GET /logout, POST /register   # Public browser forms
/// └── GET /, POST /add-todo, POST /edit-todo/:todo_id,        # Browser session
///     GET /delete-todo/:todo_id, GET /complete-todo/:todo_id,
///     POST /change-password
/// ```
///
/// # Middleware Stack
///
/// Applied outermost first:
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Authentication (per route group)
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/", post(routes::auth::register))
        .route("/token", post(routes::auth::token));

    let todo_routes = Router::new()
        .route(
            "/",
            get(routes::todos::list_todos).post(routes::todos::create_todo),
        )
        .route(
            "/:todo_id",
            get(routes::todos::get_todo)
                .put(routes::todos::update_todo)
                .delete(routes::todos::delete_todo),
        );

    let admin_routes = Router::new()
        .route("/todos", get(routes::admin::list_all_todos))
        .route("/todos/:todo_id", delete(routes::admin::delete_any_todo));

    let user_routes = Router::new()
        .route("/logged-in", get(routes::users::get_logged_in_user))
        .route("/change-password", put(routes::users::change_password))
        .route("/phone-number", put(routes::users::update_phone_number));

    let protected_api = Router::new()
        .nest("/todos", todo_routes)
        .nest("/admins", admin_routes)
        .nest("/users", user_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            api_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_api);

    let public_web_routes = Router::new()
        .route("/token", post(routes::web::token))
        .route("/login", post(routes::web::login))
        .route("/logout", get(routes::web::logout))
        .route("/register", post(routes::web::register));

    let session_web_routes = Router::new()
        .route("/", get(routes::web::home))
        .route("/add-todo", post(routes::web::add_todo))
        .route("/edit-todo/:todo_id", post(routes::web::edit_todo))
        .route("/delete-todo/:todo_id", get(routes::web::delete_todo))
        .route("/complete-todo/:todo_id", get(routes::web::complete_todo))
        .route("/change-password", post(routes::web::change_password))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/healthy", get(routes::health::health_check))
        .nest("/api", api_routes)
        .merge(public_web_routes)
        .merge(session_web_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
