//! Login and logout route handlers.
//!
//! Login checks the throttle before touching credentials, verifies against
//! the stored hash (with a legacy plaintext fallback), backfills the hash
//! for legacy rows, and issues a bearer token.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sanad_core::normalize_text;

use crate::auth::{ThrottleKey, password};
use crate::db::AdminRepository;
use crate::error::{AppError, Result};
use crate::middleware::{ClientAddr, CurrentAdmin};
use crate::routes::StatusMessage;
use crate::state::AppState;

const MAX_USERNAME_LEN: usize = 80;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AdminUser,
}

/// The authenticated admin, echoed back on login.
#[derive(Debug, Serialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
}

/// Exchange credentials for a bearer token.
///
/// POST /api/login
#[instrument(skip_all, fields(username = tracing::field::Empty))]
pub async fn login(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = normalize_text(&req.username, MAX_USERNAME_LEN);
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required.".to_owned(),
        ));
    }
    tracing::Span::current().record("username", username.as_str());

    let key = ThrottleKey::new(client, username.clone());
    if state.throttle().is_blocked(&key) {
        tracing::warn!(client = %key.client, "Login attempt while throttled");
        return Err(AppError::Throttled);
    }

    let repo = AdminRepository::new(state.pool());
    let admin = repo
        .get_by_username(&username)
        .await
        .map_err(|e| AppError::store("Unable to login right now.", e))?;

    let Some(admin) = admin else {
        state.throttle().record_failure(&key);
        return Err(AppError::Auth("Invalid credentials".to_owned()));
    };

    let verified = password::verify_password(
        &req.password,
        admin.password_hash.as_deref(),
        admin.password_salt.as_deref(),
        admin.password.as_deref(),
    );
    if !verified {
        state.throttle().record_failure(&key);
        return Err(AppError::Auth("Invalid credentials".to_owned()));
    }

    // Rows that authenticated via the legacy plaintext column get hashed
    // now that we hold the password in clear.
    if admin.password_hash.is_none() {
        let salt = password::generate_salt();
        let hash = password::hash_password(&req.password, &salt);
        if let Err(e) = repo.store_hash(admin.id, &hash, &salt).await {
            tracing::error!(admin_id = admin.id, error = %e, "Failed to migrate legacy admin password");
        }
    }

    state.throttle().clear(&key);
    let issued = state.sessions().issue(admin.id, &admin.username);

    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_owned(),
        token: issued.token,
        expires_at: issued.expires_at,
        user: AdminUser {
            id: admin.id,
            username: admin.username,
        },
    }))
}

/// Revoke the presented bearer token.
///
/// POST /api/logout
#[instrument(skip_all, fields(username = %admin.username))]
pub async fn logout(State(state): State<AppState>, admin: CurrentAdmin) -> Json<StatusMessage> {
    state.sessions().revoke(&admin.token);

    Json(StatusMessage {
        message: "Logged out successfully.".to_owned(),
    })
}
