/**
 * Change Password Handler
 *
 * POST /api/v1/users/change-password (protected)
 *
 * Verifies the old password and stores a hash of the new one. The current
 * session stays open; tokens are not revoked by a password change.
 */
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::SessionManager;
use crate::error::AuthError;
use crate::handlers::types::ChangePasswordRequest;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;

pub async fn change_password(
    State(sessions): State<Arc<SessionManager>>,
    user: CurrentUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Response, AuthError> {
    sessions
        .change_password(user.id(), &request.old_password, &request.new_password)
        .await?;

    let envelope = ApiResponse::success(
        StatusCode::OK,
        serde_json::json!({}),
        "Password changed successfully",
    );
    Ok((StatusCode::OK, Json(envelope)).into_response())
}
