//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Health check
//! GET    /health/ready            - Readiness check (pings the database)
//!
//! # Public
//! POST   /api/contact             - Submit a contact form message
//! POST   /api/login               - Exchange credentials for a bearer token
//!
//! # Admin (bearer token)
//! POST   /api/logout              - Revoke the presented token
//! GET    /api/messages            - List messages (filter + paginate)
//! PATCH  /api/messages/{id}/read  - Set a message's read flag
//! DELETE /api/messages/{id}       - Delete a message
//! ```

pub mod auth;
pub mod contact;
pub mod messages;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{delete, get, patch, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Simple `{"message": ...}` body used by several endpoints.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Build the full application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/api/contact", post(contact::submit))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/messages", get(messages::list))
        .route("/api/messages/{id}/read", patch(messages::set_read))
        .route("/api/messages/{id}", delete(messages::remove))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        // The contact form may be posted from a separately hosted site
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Readiness check: verifies the database answers.
async fn ready(State(state): State<AppState>) -> crate::error::Result<Json<serde_json::Value>> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|e| crate::error::AppError::store("Service not ready.", e))?;

    Ok(Json(serde_json::json!({ "status": "ready" })))
}
