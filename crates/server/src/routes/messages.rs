//! Admin message route handlers: list, mark read/unread, delete.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sanad_core::{ContactMessage, MessageId, ReadFlag, normalize_text};

use crate::db::{MessageFilter, MessageRepository};
use crate::error::{AppError, Result};
use crate::middleware::CurrentAdmin;
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 200;
const MAX_SEARCH_LEN: usize = 120;
const MAX_SERVICE_LEN: usize = 80;

/// Query parameters for listing messages.
///
/// Values arrive as strings and are parsed leniently: unparseable paging
/// numbers fall back to defaults rather than rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub read: Option<String>,
}

/// One page of messages plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<ContactMessage>,
    pub pagination: Pagination,
}

/// Pagination metadata for a message listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: u64,
}

/// Response after setting a read flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadUpdated {
    pub message: String,
    pub id: MessageId,
    pub is_read: bool,
}

/// Response after deleting a message.
#[derive(Debug, Serialize)]
pub struct MessageDeleted {
    pub message: String,
    pub id: MessageId,
}

#[derive(Debug, Deserialize)]
struct ReadBody {
    #[serde(rename = "isRead")]
    is_read: ReadFlag,
}

/// List messages, filtered and paginated, newest first.
///
/// GET /api/messages
#[instrument(skip_all, fields(username = %admin.username))]
pub async fn list(
    State(state): State<AppState>,
    admin: CurrentAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<MessageList>> {
    let page = parse_or(params.page.as_deref(), 1).max(1);
    let limit = parse_or(params.limit.as_deref(), DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let search = params
        .search
        .as_deref()
        .map(|s| normalize_text(s, MAX_SEARCH_LEN).to_lowercase())
        .filter(|s| !s.is_empty());
    let service = params
        .service
        .as_deref()
        .map(|s| normalize_text(s, MAX_SERVICE_LEN).to_lowercase())
        .filter(|s| !s.is_empty() && s != "all");
    let read = match params.read.as_deref().map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("read") => Some(true),
        Some(value) if value.eq_ignore_ascii_case("unread") => Some(false),
        _ => None,
    };

    let filter = MessageFilter {
        search,
        service,
        read,
    };
    let result = MessageRepository::new(state.pool())
        .list(&filter, page, limit)
        .await
        .map_err(|e| AppError::store("Failed to load messages.", e))?;

    let total_pages = total_pages(result.total, limit);

    Ok(Json(MessageList {
        messages: result.messages,
        pagination: Pagination {
            page,
            limit,
            total: result.total,
            total_pages,
        },
    }))
}

/// Set a message's read flag.
///
/// PATCH /api/messages/{id}/read
///
/// The flag is accepted as a boolean, 0/1, or the strings "0"/"1"/"true"/
/// "false"; anything else is rejected.
#[instrument(skip_all, fields(username = %admin.username))]
pub async fn set_read(
    State(state): State<AppState>,
    admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ReadUpdated>> {
    let id = parse_message_id(&id)?;
    let body: ReadBody = serde_json::from_value(body)
        .map_err(|_| AppError::Validation("Invalid read flag.".to_owned()))?;
    let is_read = body.is_read.as_bool();

    let updated = MessageRepository::new(state.pool())
        .set_read(id, is_read)
        .await
        .map_err(|e| AppError::store("Failed to update message.", e))?;

    if !updated {
        return Err(AppError::NotFound("Message not found.".to_owned()));
    }

    Ok(Json(ReadUpdated {
        message: "Message status updated.".to_owned(),
        id,
        is_read,
    }))
}

/// Delete a message.
///
/// DELETE /api/messages/{id}
#[instrument(skip_all, fields(username = %admin.username))]
pub async fn remove(
    State(state): State<AppState>,
    admin: CurrentAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageDeleted>> {
    let id = parse_message_id(&id)?;

    let deleted = MessageRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| AppError::store("Failed to delete message.", e))?;

    if !deleted {
        return Err(AppError::NotFound("Message not found.".to_owned()));
    }

    Ok(Json(MessageDeleted {
        message: "Message deleted.".to_owned(),
        id,
    }))
}

/// Parse a path segment into a positive message id.
fn parse_message_id(raw: &str) -> Result<MessageId> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(MessageId::new)
        .ok_or_else(|| AppError::Validation("Invalid message id.".to_owned()))
}

/// Parse a lenient numeric query value, falling back to `default`.
fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Page count for a listing: ceil(total/limit), minimum 1.
///
/// The count comes from `COUNT(*)` so it is never negative; the division is
/// done unsigned.
fn total_pages(total: i64, limit: u32) -> u64 {
    u64::try_from(total)
        .unwrap_or_default()
        .div_ceil(u64::from(limit))
        .max(1)
}
