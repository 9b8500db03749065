/**
 * Current User Handler
 *
 * GET /api/v1/users/current-user (protected)
 *
 * Returns the authenticated user's profile, re-read from the store so the
 * response reflects the latest persisted state rather than token claims.
 */
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::SessionManager;
use crate::error::AuthError;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;

pub async fn get_current_user(
    State(sessions): State<Arc<SessionManager>>,
    user: CurrentUser,
) -> Result<Response, AuthError> {
    let profile = sessions.current_user(user.id()).await?;

    let envelope = ApiResponse::success(
        StatusCode::OK,
        profile,
        "Current user fetched successfully",
    );
    Ok((StatusCode::OK, Json(envelope)).into_response())
}
