/**
 * Session Cookie Handling
 *
 * Tokens ride in two cookies, `accessToken` and `refreshToken`, set as
 * HttpOnly, Secure, SameSite=Strict session cookies. No Max-Age is set:
 * the browser drops them when it closes, while the tokens inside carry
 * their own expiry.
 */
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;

use crate::error::AuthError;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

const COOKIE_ATTRIBUTES: &str = "HttpOnly; Secure; Path=/; SameSite=Strict";

/// Builds a Set-Cookie value carrying a token.
pub fn build_auth_cookie(name: &str, value: &str) -> String {
    format!("{}={}; {}", name, value, COOKIE_ATTRIBUTES)
}

/// Builds a Set-Cookie value that expires the cookie immediately.
pub fn clear_auth_cookie(name: &str) -> String {
    format!("{}=; {}; Max-Age=0", name, COOKIE_ATTRIBUTES)
}

/// Reads a cookie value from the request Cookie header, skipping empties.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        if let Some((key, value)) = part.trim().split_once('=') {
            if key == name && !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

/// Appends Set-Cookie headers to an outgoing response.
pub fn append_set_cookie_headers(
    response: &mut Response,
    cookies: &[String],
) -> Result<(), AuthError> {
    for cookie in cookies {
        let header = HeaderValue::from_str(cookie).map_err(|err| {
            tracing::error!("Failed to encode Set-Cookie header: {}", err);
            AuthError::Internal
        })?;
        response.headers_mut().append(SET_COOKIE, header);
    }
    Ok(())
}
