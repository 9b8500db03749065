/**
 * Password Hashing
 *
 * bcrypt with a fixed work factor of 10. Hashing failures are logged and
 * surfaced as internal errors; verification failures of any kind (wrong
 * password, malformed stored hash) simply report a non-match so callers
 * cannot distinguish them.
 */
use crate::error::AuthError;

/// bcrypt work factor applied to every stored credential.
pub const HASH_COST: u32 = 10;

/// Hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, HASH_COST).map_err(|err| {
        tracing::error!("Password hashing failed: {:?}", err);
        AuthError::Internal
    })
}

/// Checks a plaintext password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}
