/**
 * Logout Handler
 *
 * POST /api/v1/users/logout (protected)
 *
 * Clears the stored refresh token and expires both auth cookies.
 */
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::SessionManager;
use crate::cookies::{
    append_set_cookie_headers, clear_auth_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::error::AuthError;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;

pub async fn logout(
    State(sessions): State<Arc<SessionManager>>,
    user: CurrentUser,
) -> Result<Response, AuthError> {
    sessions.logout(user.id()).await?;

    let cookies = [
        clear_auth_cookie(ACCESS_TOKEN_COOKIE),
        clear_auth_cookie(REFRESH_TOKEN_COOKIE),
    ];

    let envelope = ApiResponse::success(
        StatusCode::OK,
        serde_json::json!({}),
        "User logged out successfully",
    );
    let mut response = (StatusCode::OK, Json(envelope)).into_response();
    append_set_cookie_headers(&mut response, &cookies)?;
    Ok(response)
}
