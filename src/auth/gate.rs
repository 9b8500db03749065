/**
 * Authentication Gate
 *
 * Validates bearer access tokens for protected routes and resolves them to
 * the current user. The gate is stateless with respect to sessions: it
 * checks the token's signature and expiry and that the subject still
 * exists, but never consults the stored refresh token, so a gate check
 * cannot interleave with a concurrent rotation.
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::auth::tokens::TokenCodec;
use crate::error::AuthError;
use crate::store::{PublicUser, UserRecordStore};

pub struct AuthGate {
    store: Arc<dyn UserRecordStore>,
    tokens: TokenCodec,
}

impl AuthGate {
    pub fn new(store: Arc<dyn UserRecordStore>, tokens: TokenCodec) -> Self {
        Self { store, tokens }
    }

    /// Verifies an access token and loads the user it belongs to.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<PublicUser, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AuthError::unauthorized("Unauthorized request"))?;

        let claims = self.tokens.verify_access(token).map_err(|err| {
            tracing::warn!("Access token rejected: {}", err);
            AuthError::unauthorized("Invalid access token")
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::unauthorized("Invalid access token"))?;
        let user = self.store.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::warn!("Access token subject no longer exists: {}", user_id);
            AuthError::unauthorized("Invalid access token")
        })?;

        Ok(user.sanitized())
    }
}
