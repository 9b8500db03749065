/**
 * JWT Token Codec
 *
 * Issues and verifies the two token kinds used by the session layer:
 *
 * - Access tokens: short-lived, carry identity claims (id, username, email,
 *   full name), signed with ACCESS_TOKEN_SECRET
 * - Refresh tokens: long-lived, carry only the user id plus a unique `jti`,
 *   signed with REFRESH_TOKEN_SECRET
 *
 * The two secrets are independent, so a refresh token can never pass an
 * access check or vice versa. The `jti` makes every refresh token distinct
 * even when two are minted for the same user within the same second, which
 * rotation relies on.
 *
 * Expiry is enforced against an injected clock rather than jsonwebtoken's
 * built-in check, so tests can pin time exactly.
 */
use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::AuthError;
use crate::store::UserRecord;

const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Claims carried by a refresh token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User id.
    pub sub: String,
    /// Unique token id; two refresh tokens never share one.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a token failed verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is expired")]
    Expired,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token is malformed")]
    Malformed,
}

/// An access/refresh token pair minted together at login or rotation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing configuration, normally loaded from the environment.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl TokenConfig {
    /// Reads ACCESS_TOKEN_SECRET, REFRESH_TOKEN_SECRET and the expiry
    /// variables, falling back to development defaults with a warning.
    pub fn from_env() -> Self {
        let access_secret = env_secret(
            "ACCESS_TOKEN_SECRET",
            "cliptube-access-secret-change-in-production",
        );
        let refresh_secret = env_secret(
            "REFRESH_TOKEN_SECRET",
            "cliptube-refresh-secret-change-in-production",
        );
        let mut access_ttl_secs = env_ttl("ACCESS_TOKEN_EXPIRY_SECS", DEFAULT_ACCESS_TTL_SECS);
        let mut refresh_ttl_secs = env_ttl("REFRESH_TOKEN_EXPIRY_SECS", DEFAULT_REFRESH_TTL_SECS);

        // Refresh tokens must outlive the access tokens they renew.
        if access_ttl_secs < 0 || refresh_ttl_secs <= access_ttl_secs {
            tracing::warn!(
                "Invalid token expiry configuration (access {}s, refresh {}s), using defaults",
                access_ttl_secs,
                refresh_ttl_secs
            );
            access_ttl_secs = DEFAULT_ACCESS_TTL_SECS;
            refresh_ttl_secs = DEFAULT_REFRESH_TTL_SECS;
        }

        Self {
            access_secret,
            refresh_secret,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }
}

fn env_secret(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        tracing::warn!("Missing {}, using built-in development secret", name);
        default_value.to_string()
    })
}

fn env_ttl(name: &str, default_secs: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value '{}', using {}s", name, raw, default_secs);
            default_secs
        }),
        Err(_) => default_secs,
    }
}

/// Signs and verifies access and refresh tokens.
#[derive(Clone)]
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        // Expiry is checked against `clock` below, not by the library, so
        // a ttl of zero rejects on the very same second it was issued.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
            validation,
            clock,
        }
    }

    /// Signs an access token carrying the user's identity claims.
    pub fn sign_access(&self, user: &UserRecord) -> Result<String, AuthError> {
        let iat = self.clock.now().timestamp();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            iat,
            exp: iat + self.access_ttl_secs,
        };
        encode(&Header::default(), &claims, &self.access_encoding).map_err(|err| {
            tracing::error!("Failed to sign access token: {:?}", err);
            AuthError::Internal
        })
    }

    /// Signs a refresh token for the user id with a fresh `jti`.
    pub fn sign_refresh(&self, user_id: Uuid) -> Result<String, AuthError> {
        let iat = self.clock.now().timestamp();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.refresh_ttl_secs,
        };
        encode(&Header::default(), &claims, &self.refresh_encoding).map_err(|err| {
            tracing::error!("Failed to sign refresh token: {:?}", err);
            AuthError::Internal
        })
    }

    /// Mints a fresh access/refresh pair for the user.
    pub fn issue_pair(&self, user: &UserRecord) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.sign_access(user)?,
            refresh_token: self.sign_refresh(user.id)?,
        })
    }

    /// Verifies an access token and returns its claims.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map_err(map_decode_error)?;
        self.check_expiry(data.claims.exp)?;
        Ok(data.claims)
    }

    /// Verifies a refresh token and returns its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map_err(map_decode_error)?;
        self.check_expiry(data.claims.exp)?;
        Ok(data.claims)
    }

    fn check_expiry(&self, exp: i64) -> Result<(), TokenError> {
        if self.clock.now().timestamp() >= exp {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
