/**
 * Session Manager
 *
 * Owns the account and session lifecycle: registration, credential login,
 * refresh token rotation, logout and password changes. Each user carries at
 * most one active refresh token; issuing a new one invalidates whatever was
 * stored before.
 *
 * Rotation is protected against replay two ways: the presented token must
 * equal the stored one exactly, and the store swap is guarded by a
 * compare-and-swap on that same stored value. Concurrent rotations of one
 * token therefore produce exactly one winner.
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::{TokenCodec, TokenError, TokenPair};
use crate::error::AuthError;
use crate::media::{MediaUpload, MediaUploader};
use crate::store::{NewUserRecord, PublicUser, UserRecordStore, UserUpdate};

/// Registration input, typically collected from a multipart form.
#[derive(Debug)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub avatar: Option<MediaUpload>,
    pub cover_image: Option<MediaUpload>,
}

/// Login input. At least one of `username` / `email` must be present.
#[derive(Debug)]
pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

pub struct SessionManager {
    store: Arc<dyn UserRecordStore>,
    media: Arc<dyn MediaUploader>,
    tokens: TokenCodec,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn UserRecordStore>,
        media: Arc<dyn MediaUploader>,
        tokens: TokenCodec,
    ) -> Self {
        Self {
            store,
            media,
            tokens,
        }
    }

    /// Registers a new account.
    ///
    /// Validates that all text fields are non-blank after trimming, that the
    /// username and email are not taken, and that an avatar was uploaded.
    /// Identifiers are lowercased before storage so lookups are
    /// case-insensitive. Returns the sanitized user on success.
    pub async fn register(&self, input: RegisterInput) -> Result<PublicUser, AuthError> {
        let full_name = input.full_name.trim();
        let email = input.email.trim().to_lowercase();
        let username = input.username.trim().to_lowercase();

        // The password is checked for blankness but hashed as submitted;
        // surrounding whitespace is significant once past validation.
        if full_name.is_empty()
            || email.is_empty()
            || username.is_empty()
            || input.password.trim().is_empty()
        {
            return Err(AuthError::validation("All fields are required"));
        }

        if self
            .store
            .find_by_username_or_email(Some(&username), Some(&email))
            .await?
            .is_some()
        {
            tracing::warn!("Registration rejected, identifier taken: {}", username);
            return Err(AuthError::conflict(
                "User with email or username already exists",
            ));
        }

        let avatar = input
            .avatar
            .ok_or_else(|| AuthError::validation("Avatar file is required"))?;
        let avatar_url = self.upload_media(avatar).await?;
        let cover_image_url = match input.cover_image {
            Some(upload) => Some(self.upload_media(upload).await?),
            None => None,
        };

        let password_hash = hash_password(&input.password)?;
        let record = self
            .store
            .create(NewUserRecord {
                username,
                email,
                full_name: full_name.to_string(),
                avatar_url,
                cover_image_url,
                password_hash,
            })
            .await?;

        tracing::info!("User registered: {} ({})", record.username, record.email);
        Ok(record.sanitized())
    }

    /// Verifies credentials and opens a session.
    ///
    /// On success a fresh token pair is issued and the refresh token stored,
    /// unconditionally replacing any previous session for this user.
    pub async fn login(&self, input: LoginInput) -> Result<(PublicUser, TokenPair), AuthError> {
        let username = normalize_identifier(input.username.as_deref());
        let email = normalize_identifier(input.email.as_deref());
        if username.is_none() && email.is_none() {
            return Err(AuthError::validation("Username or email is required"));
        }

        let user = self
            .store
            .find_by_username_or_email(username.as_deref(), email.as_deref())
            .await?
            .ok_or_else(|| AuthError::not_found("User does not exist"))?;

        if !verify_password(&input.password, &user.password_hash) {
            tracing::warn!("Failed login attempt for user: {}", user.username);
            return Err(AuthError::unauthorized("Invalid user credentials"));
        }

        let pair = self.tokens.issue_pair(&user)?;
        self.store
            .update_fields(
                user.id,
                None,
                UserUpdate::set_refresh_token(&pair.refresh_token),
            )
            .await?;

        tracing::info!("User logged in: {}", user.username);
        Ok((user.sanitized(), pair))
    }

    /// Closes the user's session by clearing the stored refresh token.
    ///
    /// Idempotent: logging out twice, or with no session open, succeeds.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AuthError> {
        self.store
            .update_fields(user_id, None, UserUpdate::clear_refresh_token())
            .await?;
        tracing::info!("User logged out: {}", user_id);
        Ok(())
    }

    /// Rotates a refresh token, returning a fresh pair.
    ///
    /// The presented token must verify against the refresh secret and match
    /// the stored token exactly. The swap to the new token is guarded on the
    /// old value, so a concurrent rotation or logout makes this attempt fail
    /// rather than resurrect the session.
    pub async fn refresh(
        &self,
        incoming: Option<&str>,
    ) -> Result<(PublicUser, TokenPair), AuthError> {
        let incoming = incoming
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::unauthorized("Unauthorized request"))?;

        let claims = self.tokens.verify_refresh(incoming).map_err(|err| {
            tracing::warn!("Refresh token rejected: {}", err);
            match err {
                TokenError::Expired => {
                    AuthError::unauthorized("Refresh token is expired or used")
                }
                _ => AuthError::unauthorized("Invalid refresh token"),
            }
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::unauthorized("Invalid refresh token"))?;
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::unauthorized("Invalid refresh token"))?;

        if user.refresh_token.as_deref() != Some(incoming) {
            tracing::warn!("Stale refresh token presented for user: {}", user.username);
            return Err(AuthError::unauthorized("Refresh token is expired or used"));
        }

        let pair = self.tokens.issue_pair(&user)?;
        let swapped = self
            .store
            .update_fields(
                user.id,
                Some(incoming),
                UserUpdate::set_refresh_token(&pair.refresh_token),
            )
            .await?;
        if swapped == 0 {
            tracing::warn!("Refresh rotation lost a race for user: {}", user.username);
            return Err(AuthError::unauthorized("Refresh token is expired or used"));
        }

        tracing::info!("Refresh token rotated for user: {}", user.username);
        Ok((user.sanitized(), pair))
    }

    /// Changes the user's password after verifying the old one.
    ///
    /// Existing sessions stay valid: the stored refresh token is untouched
    /// and outstanding access tokens run to their natural expiry.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::not_found("User does not exist"))?;

        if !verify_password(old_password, &user.password_hash) {
            return Err(AuthError::unauthorized("Invalid old password"));
        }
        if new_password.trim().is_empty() {
            return Err(AuthError::validation("New password is required"));
        }

        let password_hash = hash_password(new_password)?;
        self.store
            .update_fields(user.id, None, UserUpdate::set_password_hash(password_hash))
            .await?;

        tracing::info!("Password changed for user: {}", user.username);
        Ok(())
    }

    /// Fetches the sanitized profile for an authenticated user id.
    pub async fn current_user(&self, user_id: Uuid) -> Result<PublicUser, AuthError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::not_found("User does not exist"))?;
        Ok(user.sanitized())
    }

    async fn upload_media(&self, upload: MediaUpload) -> Result<String, AuthError> {
        let field = upload.field_name.clone();
        self.media.upload(upload).await.map_err(|err| {
            tracing::error!("Upload of {} failed: {}", field, err);
            AuthError::Internal
        })
    }
}

fn normalize_identifier(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}
