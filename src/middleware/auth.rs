/**
 * Authentication Middleware
 *
 * Guards protected routes. The access token is taken from the
 * Authorization header (Bearer scheme) first, then from the accessToken
 * cookie, validated through the gate, and the resolved user is stashed in
 * request extensions for handlers to extract.
 */
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::cookies::{extract_cookie, ACCESS_TOKEN_COOKIE};
use crate::error::AuthError;
use crate::server::state::AppState;
use crate::store::PublicUser;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user attached to the request by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn user(&self) -> &PublicUser {
        &self.0
    }
}

/// Middleware that rejects requests without a valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_access_token(request.headers());
    let user = state.auth_gate.authenticate(token.as_deref()).await?;

    tracing::debug!("Authenticated request for user: {}", user.username);
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Pulls the access token out of a request, header before cookie.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        if let Some(token) = header.strip_prefix(BEARER_PREFIX) {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    extract_cookie(headers, ACCESS_TOKEN_COOKIE)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::warn!("CurrentUser extracted on a route without require_auth");
            AuthError::unauthorized("Unauthorized request")
        })
    }
}
