/**
 * Server Configuration
 *
 * Loads configuration from environment variables with development defaults
 * where that is safe. Configuration errors are logged but do not prevent
 * server startup: a missing or unreachable database degrades the server to
 * its in-memory store instead of aborting.
 */
use std::path::PathBuf;

use sqlx::PgPool;

/// Connection pool when a database is configured, `None` otherwise.
pub type DatabaseConfig = Option<PgPool>;

/// Connects to PostgreSQL and brings its schema up to date.
///
/// Returns `None` when `DATABASE_URL` is unset or unreachable so the caller
/// can fall back to the in-memory user store. A migration failure is logged
/// but not fatal: a schema migrated by an earlier run still serves.
pub async fn load_database() -> DatabaseConfig {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::warn!("DATABASE_URL not set, skipping PostgreSQL");
        return None;
    };

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("Could not reach PostgreSQL: {:?}", err);
            return None;
        }
    };
    tracing::info!("Connected to PostgreSQL");

    if let Err(err) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Migrations did not apply cleanly: {:?}", err);
    }

    Some(pool)
}

/// Directory uploaded media is written to and served from.
///
/// Reads `MEDIA_ROOT`, defaulting to `public/media` relative to the working
/// directory.
pub fn media_root() -> PathBuf {
    match std::env::var("MEDIA_ROOT") {
        Ok(root) => PathBuf::from(root),
        Err(_) => {
            tracing::warn!("MEDIA_ROOT not set, defaulting to public/media");
            PathBuf::from("public/media")
        }
    }
}

/// Port the HTTP server binds to. Reads `SERVER_PORT`, defaulting to 3000.
pub fn server_port() -> u16 {
    match std::env::var("SERVER_PORT") {
        Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!("Invalid SERVER_PORT value '{}', using 3000", raw);
            3000
        }),
        Err(_) => 3000,
    }
}
