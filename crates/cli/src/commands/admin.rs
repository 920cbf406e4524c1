//! Admin credential management commands.

use sanad_server::auth::password;
use sanad_server::config::ServerConfig;
use sanad_server::db::{self, AdminRepository};

use super::CliError;

/// Create a new admin with hashed credentials.
pub async fn create(username: &str, pass: &str) -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let salt = password::generate_salt();
    let hash = password::hash_password(pass, &salt);

    let inserted = AdminRepository::new(&pool)
        .create(username, &hash, &salt)
        .await?;
    if !inserted {
        return Err(CliError::UsernameTaken(username.to_owned()));
    }

    tracing::info!(username, "Admin created");
    Ok(())
}

/// Rotate an existing admin's password.
///
/// This is the expected followup after first login with the seeded
/// bootstrap credentials.
pub async fn set_password(username: &str, pass: &str) -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let repo = AdminRepository::new(&pool);
    let admin = repo
        .get_by_username(username)
        .await?
        .ok_or_else(|| CliError::AdminNotFound(username.to_owned()))?;

    let salt = password::generate_salt();
    let hash = password::hash_password(pass, &salt);
    repo.store_hash(admin.id, &hash, &salt).await?;

    tracing::info!(username, "Password updated");
    Ok(())
}
