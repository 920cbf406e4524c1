//! Admin credential repository.

use sqlx::SqlitePool;

/// One row of the `admins` table.
///
/// `password` is the legacy plaintext column; rows that predate hashing may
/// still carry it until the startup backfill or a successful login rewrites
/// them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRecord {
    pub id: i64,
    pub username: String,
    pub password: Option<String>,
    pub password_hash: Option<String>,
    pub password_salt: Option<String>,
}

/// Repository for admin database operations.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up an admin by username.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<AdminRecord>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, username, password, password_hash, password_salt \
             FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
    }

    /// Store a new hash and salt for an admin, clearing any legacy
    /// plaintext password.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the update fails.
    pub async fn store_hash(&self, id: i64, hash: &str, salt: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE admins SET password_hash = ?, password_salt = ?, password = NULL \
             WHERE id = ?",
        )
        .bind(hash)
        .bind(salt)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new admin with hashed credentials.
    ///
    /// Returns `false` if the username is already taken.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` for database failures other than the username
    /// conflict.
    pub async fn create(&self, username: &str, hash: &str, salt: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO admins (username, password, password_hash, password_salt) \
             VALUES (?, NULL, ?, ?)",
        )
        .bind(username)
        .bind(hash)
        .bind(salt)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
