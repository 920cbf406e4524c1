//! HTTP client for the server's JSON API.
//!
//! Requests time out after 12 seconds; timeouts and authentication failures
//! are distinct error variants so the caller can tell "try again" from
//! "clear the session and log in again".

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use sanad_core::{ContactMessage, MessageId};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

/// Page size used when aggregating the full message list.
const FETCH_LIMIT: u32 = 200;

/// Errors from the dashboard API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The server rejected the session (401/403). The caller should clear
    /// the stored token and return to the login screen.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other API error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No token is held but the operation requires one.
    #[error("not logged in")]
    NotLoggedIn,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// A successful login: the bearer token and its initial expiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: LoginUser,
}

/// The admin identity echoed back on login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize)]
struct MessagesPayload {
    messages: Vec<ContactMessage>,
    pagination: PaginationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationPayload {
    total_pages: i64,
}

/// Client for the server's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Whether the client currently holds a token.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Log in and store the bearer token for subsequent requests.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` for bad credentials, `ApiError::Api` for
    /// throttling or validation failures, transport variants otherwise.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let outcome: LoginOutcome = Self::check(response).await?.json().await?;
        self.token = Some(outcome.token.clone());

        Ok(outcome)
    }

    /// Revoke the held token server-side and forget it locally.
    ///
    /// The local token is dropped even if the server call fails; a dead
    /// session on the server expires on its own.
    ///
    /// # Errors
    ///
    /// Returns the underlying error after dropping the token.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let token = self.token.take().ok_or(ApiError::NotLoggedIn)?;

        let response = self
            .client
            .post(self.url("/api/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    /// Fetch every message, walking the server's pages and merging them into
    /// a single list.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when the session has expired; transport and
    /// API variants otherwise.
    pub async fn fetch_all_messages(&self) -> Result<Vec<ContactMessage>, ApiError> {
        let token = self.token.as_ref().ok_or(ApiError::NotLoggedIn)?;

        let mut aggregated = Vec::new();
        let mut page: i64 = 1;
        let mut total_pages: i64 = 1;

        while page <= total_pages {
            let response = self
                .client
                .get(self.url("/api/messages"))
                .query(&[("page", page.to_string()), ("limit", FETCH_LIMIT.to_string())])
                .bearer_auth(token)
                .send()
                .await?;

            let payload: MessagesPayload = Self::check(response).await?.json().await?;
            aggregated.extend(payload.messages);
            total_pages = payload.pagination.total_pages.max(1);
            page += 1;
        }

        tracing::debug!(count = aggregated.len(), "Fetched messages");
        Ok(aggregated)
    }

    /// Set the read flag on one message.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_all_messages`].
    pub async fn set_read(&self, id: MessageId, is_read: bool) -> Result<(), ApiError> {
        let token = self.token.as_ref().ok_or(ApiError::NotLoggedIn)?;

        let response = self
            .client
            .patch(self.url(&format!("/api/messages/{id}/read")))
            .bearer_auth(token)
            .json(&json!({ "isRead": is_read }))
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    /// Delete one message.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_all_messages`].
    pub async fn delete_message(&self, id: MessageId) -> Result<(), ApiError> {
        let token = self.token.as_ref().ok_or(ApiError::NotLoggedIn)?;

        let response = self
            .client
            .delete(self.url(&format!("/api/messages/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Turn a non-success response into the right error variant, extracting
    /// the server's `{"error": ...}` message when present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(serde_json::Value::as_str)
            .map_or_else(
                || format!("Request failed ({status})"),
                std::borrow::ToOwned::to_owned,
            );

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized(message));
        }

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_payload_parses() {
        let json = r#"{
            "message": "Login successful",
            "token": "abc123",
            "expiresAt": "2026-01-01T12:00:00Z",
            "user": { "id": 1, "username": "admin" }
        }"#;

        let outcome: LoginOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.token, "abc123");
        assert_eq!(outcome.user.username, "admin");
    }

    #[test]
    fn test_messages_payload_parses() {
        let json = r#"{
            "messages": [{
                "id": 3,
                "name": "Ali",
                "email": "a@b.com",
                "service": "CRM",
                "message": "hi",
                "timestamp": "2026-01-01T00:00:00Z",
                "isRead": false
            }],
            "pagination": { "page": 1, "limit": 200, "total": 1, "totalPages": 1 }
        }"#;

        let payload: MessagesPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.messages.len(), 1);
        assert_eq!(payload.messages[0].id.as_i64(), 3);
        assert!(!payload.messages[0].is_read);
        assert_eq!(payload.pagination.total_pages, 1);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/api/login"), "http://localhost:3000/api/login");
    }
}
