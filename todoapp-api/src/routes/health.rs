//! Health check endpoint
//!
//! # Endpoint
//!
//! ```text
//! GET /healthy
//! ```
//!
//! # Response
//!
//! ```json
//! {
//!   "status": "Healthy",
//!   "version": "0.1.0",
//!   "database": "connected"
//! }
//! ```
//!
//! The endpoint always answers 200; `database` reports whether a pooled
//! connection could run a query.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use todoapp_shared::db::pool::health_check as database_health_check;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_status = match database_health_check(&state.db).await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "Healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    })
}
