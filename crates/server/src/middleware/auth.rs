//! Authentication extractor for admin-only routes.
//!
//! Admin endpoints take a bearer token issued by `POST /api/login`. The
//! extractor validates it against the session registry, which also slides
//! the expiry forward on success.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::SessionStatus;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a valid admin session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     admin: CurrentAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    /// Username the session belongs to.
    pub username: String,
    /// The presented token, kept so logout can revoke it.
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let Some(token) = header.and_then(parse_bearer_token) else {
            return Err(AppError::Auth("Missing authorization token.".to_owned()));
        };

        match state.sessions().validate(&token) {
            SessionStatus::Valid(session) => Ok(Self {
                username: session.username,
                token,
            }),
            SessionStatus::Unknown => Err(AppError::Auth("Invalid session token.".to_owned())),
            SessionStatus::Expired => Err(AppError::Auth(
                "Session expired. Please login again.".to_owned(),
            )),
        }
    }
}

/// Best-effort client address, used to key the login throttle.
///
/// Prefers the first `x-forwarded-for` hop, then the peer address recorded
/// by `into_make_service_with_connect_info`, then a fixed marker so
/// throttling still applies when neither is known.
#[derive(Debug, Clone)]
pub struct ClientAddr(pub String);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        use std::net::SocketAddr;

        use axum::extract::ConnectInfo;

        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        let addr = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(peer)| peer.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_owned());

        Ok(Self(addr))
    }
}

/// Extract the token from a `Bearer <token>` header value.
fn parse_bearer_token(header: &str) -> Option<String> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_owned())
}
