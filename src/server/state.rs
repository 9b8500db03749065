/**
 * Application State Management
 *
 * Defines the application state structure and implements the `FromRef`
 * traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - The session manager (register, login, refresh, logout, password)
 * - The auth gate (access token validation for protected routes)
 * - The media root directory for static file serving
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part of the
 * state they need, so a login handler asks for `State<Arc<SessionManager>>`
 * rather than the whole `AppState`.
 */
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{AuthGate, SessionManager, TokenCodec};
use crate::media::MediaUploader;
use crate::store::UserRecordStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Drives the account and session lifecycle operations.
    pub session_manager: Arc<SessionManager>,

    /// Validates access tokens for protected routes.
    pub auth_gate: Arc<AuthGate>,

    /// Directory uploaded media is served from under /media.
    pub media_root: PathBuf,
}

impl AppState {
    /// Wires the session manager and auth gate around shared store, media
    /// and token codec instances.
    pub fn new(
        store: Arc<dyn UserRecordStore>,
        media: Arc<dyn MediaUploader>,
        tokens: TokenCodec,
        media_root: PathBuf,
    ) -> Self {
        let session_manager = Arc::new(SessionManager::new(
            store.clone(),
            media,
            tokens.clone(),
        ));
        let auth_gate = Arc::new(AuthGate::new(store, tokens));
        Self {
            session_manager,
            auth_gate,
            media_root,
        }
    }
}

/// Lets handlers extract `State<Arc<SessionManager>>` directly.
impl FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_manager.clone()
    }
}

/// Lets middleware and handlers extract `State<Arc<AuthGate>>` directly.
impl FromRef<AppState> for Arc<AuthGate> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_gate.clone()
    }
}
