/**
 * Request and Response Types
 *
 * JSON bodies for the user endpoints. Wire casing is camelCase to match
 * the cookie names and envelope fields.
 */
use serde::{Deserialize, Serialize};

use crate::auth::TokenPair;
use crate::store::PublicUser;

/// Body for POST /api/v1/users/login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Successful login payload: the user plus both tokens, which are also
/// mirrored into cookies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginData {
    pub fn new(user: PublicUser, pair: TokenPair) -> Self {
        Self {
            user,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Optional body for POST /api/v1/users/refresh-token. The token may come
/// from the refreshToken cookie instead.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Payload returned by a successful token refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for RefreshData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Body for POST /api/v1/users/change-password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
