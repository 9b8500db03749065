/**
 * Authentication Error Types
 *
 * Every fallible operation in the crate surfaces one of these variants. The
 * taxonomy maps one-to-one onto HTTP status codes, and the `Internal` variant
 * deliberately carries no detail: whatever went wrong has already been logged
 * at the failure site, and callers only ever see a generic message.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Error taxonomy for registration, login, token and session operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Request input failed validation (blank fields, malformed body).
    #[error("{message}")]
    Validation { message: String },

    /// A unique constraint would be violated (username or email taken).
    #[error("{message}")]
    Conflict { message: String },

    /// The referenced user does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// Credentials or tokens were missing, invalid, expired or already used.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Infrastructure failure. Detail is logged, never returned to clients.
    #[error("Internal server error")]
    Internal,
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// HTTP status code this error renders as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation { .. } => StatusCode::BAD_REQUEST,
            AuthError::Conflict { .. } => StatusCode::CONFLICT,
            AuthError::NotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for the response envelope.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => {
                AuthError::conflict("User with email or username already exists")
            }
            // The store logs the underlying driver error before returning this.
            StoreError::Unavailable(_) => AuthError::Internal,
        }
    }
}
