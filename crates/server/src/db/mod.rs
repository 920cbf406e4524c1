//! SQLite storage.
//!
//! # Tables
//!
//! - `messages` - contact form submissions with read/unread state
//! - `admins` - dashboard credentials (salted PBKDF2 hashes; a legacy
//!   plaintext column survives from early deployments and is backfilled at
//!   startup)
//!
//! The schema is created in place on startup via [`init_schema`]; there is
//! no separate migration directory. Queries are bound at runtime so the
//! crate builds without a live database.

pub mod admins;
pub mod messages;

pub use admins::{AdminRecord, AdminRepository};
pub use messages::{MessageFilter, MessagePage, MessageRepository, NewMessage};

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::auth::password;

/// Username seeded on first startup when no admin exists.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Bootstrap password for the seeded admin. Rotate it after first login.
const DEFAULT_ADMIN_PASSWORD: &str = "password123";

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create tables and indexes, seed the bootstrap admin, and backfill any
/// legacy plaintext passwords into hashed form.
///
/// Idempotent; safe to run on every startup.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            service TEXT NOT NULL,
            message TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0,
            timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS admins (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT,
            password_hash TEXT,
            password_salt TEXT
        )
        ",
    )
    .execute(pool)
    .await?;

    // Columns added after the first deployments; old databases gain them here
    ensure_column(pool, "messages", "is_read", "is_read INTEGER NOT NULL DEFAULT 0").await?;
    ensure_column(pool, "admins", "password_hash", "password_hash TEXT").await?;
    ensure_column(pool, "admins", "password_salt", "password_salt TEXT").await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_timestamp ON messages(timestamp DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_service ON messages(service)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_email ON messages(email)")
        .execute(pool)
        .await?;

    seed_default_admin(pool).await?;
    migrate_legacy_passwords(pool).await?;

    Ok(())
}

/// Add `column` to `table` if it is not already present.
async fn ensure_column(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<(), sqlx::Error> {
    let present: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_optional(pool)
            .await?;

    if present.is_none() {
        sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {definition}"))
            .execute(pool)
            .await?;
        tracing::info!(table, column, "Added missing column");
    }

    Ok(())
}

/// Insert the bootstrap admin unless an admin with that username exists.
async fn seed_default_admin(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Check first: the KDF is deliberately slow, so don't pay for it on
    // every startup just to have INSERT OR IGNORE discard the row
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM admins WHERE username = ?")
        .bind(DEFAULT_ADMIN_USERNAME)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let salt = password::generate_salt();
    let hash = password::hash_password(DEFAULT_ADMIN_PASSWORD, &salt);

    sqlx::query(
        "INSERT OR IGNORE INTO admins (username, password, password_hash, password_salt) \
         VALUES (?, NULL, ?, ?)",
    )
    .bind(DEFAULT_ADMIN_USERNAME)
    .bind(hash)
    .bind(salt)
    .execute(pool)
    .await?;

    Ok(())
}

/// Hash any admin rows that still carry only a plaintext password.
async fn migrate_legacy_passwords(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT id, password FROM admins \
         WHERE password_hash IS NULL AND password IS NOT NULL",
    )
    .fetch_all(pool)
    .await?;

    for (id, plaintext) in rows {
        let salt = password::generate_salt();
        let hash = password::hash_password(&plaintext, &salt);

        sqlx::query(
            "UPDATE admins SET password_hash = ?, password_salt = ?, password = NULL \
             WHERE id = ?",
        )
        .bind(hash)
        .bind(salt)
        .bind(id)
        .execute(pool)
        .await?;

        tracing::info!(admin_id = id, "Migrated legacy admin password");
    }

    Ok(())
}
