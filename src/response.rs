/**
 * API Response Envelope
 *
 * Every JSON endpoint wraps its payload in the same envelope:
 *
 * ```json
 * { "statusCode": 200, "data": { ... }, "message": "...", "success": true }
 * ```
 *
 * Failures carry `"data": null` and an `errors` array; the `errors` key is
 * omitted entirely on success so clients can branch on its presence.
 */
use axum::http::StatusCode;
use serde::Serialize;

/// Uniform envelope for success and failure responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: Some(data),
            message: message.into(),
            success: status.as_u16() < 400,
            errors: None,
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: None,
            message: message.into(),
            success: false,
            errors: Some(Vec::new()),
        }
    }
}
