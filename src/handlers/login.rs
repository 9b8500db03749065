/**
 * Login Handler
 *
 * POST /api/v1/users/login
 *
 * Verifies credentials, opens a session and returns the token pair both in
 * the JSON body and as accessToken / refreshToken cookies. Cookies are only
 * set on success; a failed login leaves whatever the client had untouched.
 *
 * # Example Request
 * ```json
 * { "email": "alice@example.com", "password": "secret" }
 * ```
 */
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::{LoginInput, SessionManager};
use crate::cookies::{
    append_set_cookie_headers, build_auth_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::error::AuthError;
use crate::handlers::types::{LoginData, LoginRequest};
use crate::response::ApiResponse;

pub async fn login(
    State(sessions): State<Arc<SessionManager>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    let (user, pair) = sessions
        .login(LoginInput {
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await?;

    let cookies = [
        build_auth_cookie(ACCESS_TOKEN_COOKIE, &pair.access_token),
        build_auth_cookie(REFRESH_TOKEN_COOKIE, &pair.refresh_token),
    ];

    let envelope = ApiResponse::success(
        StatusCode::OK,
        LoginData::new(user, pair),
        "User logged in successfully",
    );
    let mut response = (StatusCode::OK, Json(envelope)).into_response();
    append_set_cookie_headers(&mut response, &cookies)?;
    Ok(response)
}
