/**
 * Server Initialization
 *
 * Builds the Axum application: token codec from environment configuration,
 * user store (PostgreSQL when available, in-memory otherwise), media
 * uploader, application state and router.
 *
 * # Initialization Process
 *
 * 1. Load token signing configuration
 * 2. Connect to the database, falling back to the in-memory store
 * 3. Set up local media storage
 * 4. Assemble the application state and router
 */
use std::sync::Arc;

use axum::Router;

use crate::auth::{TokenCodec, TokenConfig};
use crate::clock::{Clock, SystemClock};
use crate::media::{LocalMediaUploader, MediaUploader};
use crate::routes::create_router;
use crate::server::config;
use crate::server::state::AppState;
use crate::store::{MemoryUserStore, PostgresUserStore, UserRecordStore};

/// Create and configure the Axum application.
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// Startup is resilient: a missing database falls back to the in-memory
/// store with a warning instead of aborting, so local development works
/// without any infrastructure.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing ClipTube auth server");

    // Step 1: Token signing configuration
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tokens = TokenCodec::new(TokenConfig::from_env(), clock);

    // Step 2: User store, preferring PostgreSQL
    let store: Arc<dyn UserRecordStore> = match config::load_database().await {
        Some(pool) => Arc::new(PostgresUserStore::new(pool)),
        None => {
            tracing::warn!("Using the in-memory user store; accounts will not survive a restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    // Step 3: Media storage
    let media_root = config::media_root();
    let media: Arc<dyn MediaUploader> = Arc::new(LocalMediaUploader::new(media_root.clone()));

    // Step 4: Application state and router
    let app_state = AppState::new(store, media, tokens, media_root);
    tracing::info!("Session manager and auth gate initialized");

    create_router(app_state)
}
