/**
 * Router Configuration
 *
 * Assembles the complete Axum router: health check, user API routes,
 * static serving of uploaded media, and a 404 fallback.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (public + protected user endpoints)
 * 3. Media file serving under /media
 * 4. Fallback handler (404)
 */
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use tower_http::services::ServeDir;

use crate::response::ApiResponse;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
///
/// # Arguments
///
/// * `app_state` - Application state holding the session manager, auth gate
///   and media root
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    // Health check first; it must never require authentication.
    let router = Router::new().route("/health", axum::routing::get(health_check));

    // Add user API routes
    let router = configure_api_routes(router, &app_state);

    // Serve uploaded avatars and cover images
    let router = router.nest_service("/media", ServeDir::new(&app_state.media_root));

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success(
        StatusCode::OK,
        serde_json::json!({ "status": "ok" }),
        "Service is healthy",
    ))
}
