/**
 * API Route Configuration
 *
 * Defines the user endpoints and splits them into a public and a
 * protected group. The protected group runs behind the authentication
 * middleware, so its handlers can assume a valid CurrentUser extension.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/v1/users/register` - Create an account (multipart)
 * - `POST /api/v1/users/login` - Credential login
 * - `POST /api/v1/users/refresh-token` - Rotate a refresh token
 *
 * ## Protected
 * - `POST /api/v1/users/logout` - Close the session
 * - `POST /api/v1/users/change-password` - Change the password
 * - `GET  /api/v1/users/current-user` - Fetch the authenticated profile
 */
use axum::middleware;
use axum::Router;

use crate::handlers::{
    change_password, get_current_user, login, logout, refresh_token, register,
};
use crate::middleware::require_auth;
use crate::server::state::AppState;

/// Adds the user API routes to the router.
///
/// The refresh endpoint stays public: its credential is the refresh token
/// itself, which outlives any access token.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/api/v1/users/logout",
            axum::routing::post(logout),
        )
        .route(
            "/api/v1/users/change-password",
            axum::routing::post(change_password),
        )
        .route(
            "/api/v1/users/current-user",
            axum::routing::get(get_current_user),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    router
        // Public endpoints
        .route(
            "/api/v1/users/register",
            axum::routing::post(register),
        )
        .route(
            "/api/v1/users/login",
            axum::routing::post(login),
        )
        .route(
            "/api/v1/users/refresh-token",
            axum::routing::post(refresh_token),
        )
        .merge(protected)
}
