/**
 * Error Response Conversion
 *
 * Renders `AuthError` as an HTTP response carrying the standard failure
 * envelope, so handlers can simply return `Result<_, AuthError>` and let
 * axum do the rest.
 */
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AuthError;
use crate::response::ApiResponse;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed with internal error");
        }
        let body = ApiResponse::<serde_json::Value>::failure(status, self.message());
        (status, Json(body)).into_response()
    }
}
