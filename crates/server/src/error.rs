//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every error response body is `{"error": string}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input. The message names the failing field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, invalid, or expired credentials.
    #[error("Auth error: {0}")]
    Auth(String),

    /// Login attempts are rate-limited for this client+username.
    #[error("Throttled")]
    Throttled,

    /// Operation targeted a nonexistent message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying persistence failure. The source is logged server-side;
    /// only `message` is shown to the client.
    #[error("Store error: {message}")]
    Store {
        /// Client-safe message for this operation.
        message: &'static str,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Wrap a database error with a client-safe, per-operation message.
    #[must_use]
    pub const fn store(message: &'static str, source: sqlx::Error) -> Self {
        Self::Store { message, source }
    }
}

/// JSON body for all error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture store failures to Sentry with full detail
        if let Self::Store { message, source } = &self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %source,
                context = message,
                sentry_event_id = %event_id,
                "Store error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Throttled => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Never expose internal error details to clients
        let message = match self {
            Self::Validation(msg) | Self::Auth(msg) | Self::NotFound(msg) => msg,
            Self::Throttled => "Too many failed attempts. Please try again later.".to_owned(),
            Self::Store { message, .. } => message.to_owned(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Message not found.".to_owned());
        assert_eq!(err.to_string(), "Not found: Message not found.");

        let err = AppError::Validation("Invalid message id.".to_owned());
        assert_eq!(err.to_string(), "Validation error: Invalid message id.");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth("test".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(get_status(AppError::Throttled), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::store("Failed to save message.", sqlx::Error::PoolClosed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
