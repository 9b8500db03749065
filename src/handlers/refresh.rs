/**
 * Token Refresh Handler
 *
 * POST /api/v1/users/refresh-token
 *
 * Rotates a refresh token into a fresh pair. The incoming token is read
 * from the refreshToken cookie first, then from an optional JSON body, so
 * both browser and non-cookie API clients are served. New cookies are set
 * on success.
 *
 * # Example Request
 * ```json
 * { "refreshToken": "eyJhbGciOi..." }
 * ```
 */
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::SessionManager;
use crate::cookies::{
    append_set_cookie_headers, build_auth_cookie, extract_cookie, ACCESS_TOKEN_COOKIE,
    REFRESH_TOKEN_COOKIE,
};
use crate::error::AuthError;
use crate::handlers::types::{RefreshData, RefreshRequest};
use crate::response::ApiResponse;

pub async fn refresh_token(
    State(sessions): State<Arc<SessionManager>>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> Result<Response, AuthError> {
    let incoming = extract_cookie(&headers, REFRESH_TOKEN_COOKIE)
        .or_else(|| body.and_then(|Json(request)| request.refresh_token));

    let (_user, pair) = sessions.refresh(incoming.as_deref()).await?;

    let cookies = [
        build_auth_cookie(ACCESS_TOKEN_COOKIE, &pair.access_token),
        build_auth_cookie(REFRESH_TOKEN_COOKIE, &pair.refresh_token),
    ];

    let envelope = ApiResponse::success(
        StatusCode::OK,
        RefreshData::from(pair),
        "Access token refreshed",
    );
    let mut response = (StatusCode::OK, Json(envelope)).into_response();
    append_set_cookie_headers(&mut response, &cookies)?;
    Ok(response)
}
