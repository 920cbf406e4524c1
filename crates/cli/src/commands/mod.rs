//! CLI command implementations.

pub mod admin;
pub mod export;
pub mod migrate;

use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] sanad_server::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("API error: {0}")]
    Api(#[from] sanad_dashboard::ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("No admin named {0}")]
    AdminNotFound(String),

    #[error("Invalid read filter {0:?} (expected all, read, or unread)")]
    InvalidReadFilter(String),
}
