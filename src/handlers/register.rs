/**
 * Registration Handler
 *
 * POST /api/v1/users/register
 *
 * Accepts a multipart form with the text fields fullName, email, username
 * and password, a required avatar file and an optional coverImage file.
 *
 * # Example Response (201)
 * ```json
 * {
 *   "statusCode": 201,
 *   "data": { "id": "...", "username": "alice", "avatarUrl": "/media/..." },
 *   "message": "User registered successfully",
 *   "success": true
 * }
 * ```
 */
use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::{RegisterInput, SessionManager};
use crate::error::AuthError;
use crate::media::MediaUpload;
use crate::response::ApiResponse;

pub async fn register(
    State(sessions): State<Arc<SessionManager>>,
    mut multipart: Multipart,
) -> Result<Response, AuthError> {
    tracing::info!("Registration attempt received");

    let mut input = RegisterInput {
        full_name: String::new(),
        email: String::new(),
        username: String::new(),
        password: String::new(),
        avatar: None,
        cover_image: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "fullName" => input.full_name = read_text(field).await?,
            "email" => input.email = read_text(field).await?,
            "username" => input.username = read_text(field).await?,
            "password" => input.password = read_text(field).await?,
            "avatar" => input.avatar = read_file("avatar", field).await?,
            "coverImage" => input.cover_image = read_file("coverImage", field).await?,
            other => tracing::debug!("Ignoring unknown multipart field: {}", other),
        }
    }

    let user = sessions.register(input).await?;

    let envelope = ApiResponse::success(StatusCode::CREATED, user, "User registered successfully");
    Ok((StatusCode::CREATED, Json(envelope)).into_response())
}

async fn read_text(field: Field<'_>) -> Result<String, AuthError> {
    field.text().await.map_err(malformed_multipart)
}

/// Reads a file field; a part with no content counts as absent.
async fn read_file(name: &str, field: Field<'_>) -> Result<Option<MediaUpload>, AuthError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let bytes = field.bytes().await.map_err(malformed_multipart)?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(MediaUpload {
        field_name: name.to_string(),
        file_name,
        bytes: bytes.to_vec(),
    }))
}

fn malformed_multipart(err: axum::extract::multipart::MultipartError) -> AuthError {
    tracing::warn!("Malformed multipart body: {}", err);
    AuthError::validation("Malformed multipart form data")
}
