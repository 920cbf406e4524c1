//! Database migration command.
//!
//! Runs the same idempotent schema setup the server performs on startup:
//! create tables and indexes, seed the bootstrap admin if absent, and
//! backfill any legacy plaintext passwords.

use sanad_server::config::ServerConfig;
use sanad_server::db;

use super::CliError;

/// Run migrations against the configured database.
pub async fn run() -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::init_schema(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
