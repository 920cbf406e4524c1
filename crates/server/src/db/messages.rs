//! Contact message repository.
//!
//! List queries are assembled with `QueryBuilder` because the filter set is
//! dynamic: a free-text search over name/email/service/message, an exact
//! (case-insensitive) service match, and a read/unread flag, all optional
//! and conjunctive.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use sanad_core::{ContactMessage, MessageId};

/// A validated, normalized submission ready to insert.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

/// Optional conjunctive filters for listing messages.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Case-insensitive substring match over name, email, service, message.
    pub search: Option<String>,
    /// Exact case-insensitive service match.
    pub service: Option<String>,
    /// Read/unread state; `None` matches both.
    pub read: Option<bool>,
}

/// One page of results plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct MessagePage {
    pub messages: Vec<ContactMessage>,
    pub total: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    name: String,
    email: String,
    service: String,
    message: String,
    timestamp: DateTime<Utc>,
    is_read: bool,
}

impl From<MessageRow> for ContactMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: MessageId::new(row.id),
            name: row.name,
            email: row.email,
            service: row.service,
            message: row.message,
            timestamp: row.timestamp,
            is_read: row.is_read,
        }
    }
}

/// Repository for contact message database operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a submission, returning its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn insert(&self, new: &NewMessage) -> Result<MessageId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO messages (name, email, service, message) VALUES (?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.service)
        .bind(&new.message)
        .execute(self.pool)
        .await?;

        Ok(MessageId::new(result.last_insert_rowid()))
    }

    /// Fetch one page of messages matching `filter`, newest first.
    ///
    /// `page` is 1-based; callers clamp `limit` before reaching here. The id
    /// is a secondary sort key so rows sharing a timestamp paginate stably.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if either the count or the data query fails.
    pub async fn list(
        &self,
        filter: &MessageFilter,
        page: u32,
        limit: u32,
    ) -> Result<MessagePage, sqlx::Error> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM messages");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let mut data_query = QueryBuilder::new(
            "SELECT id, name, email, service, message, timestamp, is_read FROM messages",
        );
        push_filters(&mut data_query, filter);
        data_query
            .push(" ORDER BY timestamp DESC, id DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<MessageRow> = data_query.build_query_as().fetch_all(self.pool).await?;

        Ok(MessagePage {
            messages: rows.into_iter().map(ContactMessage::from).collect(),
            total,
        })
    }

    /// Set the read flag on a message. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the update fails.
    pub async fn set_read(&self, id: MessageId, is_read: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE messages SET is_read = ? WHERE id = ?")
            .bind(i64::from(is_read))
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a message. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the delete fails.
    pub async fn delete(&self, id: MessageId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Append the `WHERE` clause for `filter` to a query.
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &MessageFilter) {
    let mut prefix = " WHERE ";

    if let Some(search) = &filter.search {
        let like = format!("%{}%", search.to_lowercase());
        query
            .push(prefix)
            .push("(LOWER(name) LIKE ")
            .push_bind(like.clone())
            .push(" OR LOWER(email) LIKE ")
            .push_bind(like.clone())
            .push(" OR LOWER(service) LIKE ")
            .push_bind(like.clone())
            .push(" OR LOWER(message) LIKE ")
            .push_bind(like)
            .push(")");
        prefix = " AND ";
    }

    if let Some(service) = &filter.service {
        query
            .push(prefix)
            .push("LOWER(service) = ")
            .push_bind(service.to_lowercase());
        prefix = " AND ";
    }

    if let Some(read) = filter.read {
        query
            .push(prefix)
            .push("is_read = ")
            .push_bind(i64::from(read));
    }
}
