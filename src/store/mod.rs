//! User record persistence.
//!
//! # Architecture
//!
//! The rest of the crate only ever talks to [`UserRecordStore`], a trait
//! object injected at startup. Two implementations exist:
//!
//! - [`memory::MemoryUserStore`]: process-local `HashMap` behind a `RwLock`,
//!   used by the test suite and as a fallback when no database is reachable
//! - [`postgres::PostgresUserStore`]: sqlx-backed store for production
//!
//! # Concurrency contract
//!
//! `update_fields` takes an optional `refresh_token_guard`. When the guard is
//! present the update only applies while the stored refresh token still
//! equals the guard value, and the returned row count tells the caller
//! whether it won. This compare-and-swap is the serialization point for
//! refresh token rotation: of N concurrent rotations presenting the same
//! token, exactly one observes 1 affected row.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryUserStore;
pub use postgres::PostgresUserStore;

/// A user row as persisted, including credential material.
///
/// Never serialize this type into a response. Use [`UserRecord::sanitized`]
/// to obtain the client-safe view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub password_hash: String,
    /// Most recently issued refresh token, or `None` when logged out.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Client-safe projection without the password hash or refresh token.
    pub fn sanitized(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
            cover_image_url: self.cover_image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The view of a user that goes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user. Identifiers are already normalized
/// (trimmed, lowercased) and the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub password_hash: String,
}

/// Partial update applied by [`UserRecordStore::update_fields`].
///
/// The outer `Option` on `refresh_token` means "should this column change",
/// the inner one is the new value. `Some(None)` clears the token.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub refresh_token: Option<Option<String>>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    pub fn set_refresh_token(token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(Some(token.into())),
            password_hash: None,
        }
    }

    pub fn clear_refresh_token() -> Self {
        Self {
            refresh_token: Some(None),
            password_hash: None,
        }
    }

    pub fn set_password_hash(hash: impl Into<String>) -> Self {
        Self {
            refresh_token: None,
            password_hash: Some(hash.into()),
        }
    }
}

/// Failures a store implementation can surface.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Username or email already taken.
    #[error("user with the same username or email already exists")]
    Duplicate,

    /// The backing store could not be reached or the query failed.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam for user records.
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Looks up a user matching either identifier. `None` arguments never
    /// match; passing both returns whichever the store finds first.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Inserts a new user, enforcing username and email uniqueness.
    async fn create(&self, new_user: NewUserRecord) -> Result<UserRecord, StoreError>;

    /// Applies `update` to the user with `id` and returns the number of
    /// records changed (0 or 1).
    ///
    /// With `refresh_token_guard` set, the update only applies while the
    /// stored refresh token equals the guard. A 0 return then means the
    /// caller lost the rotation race or the token was already cleared.
    async fn update_fields(
        &self,
        id: Uuid,
        refresh_token_guard: Option<&str>,
        update: UserUpdate,
    ) -> Result<u64, StoreError>;
}
