//! Error handling for the authentication service.
//!
//! Split into two parts:
//! - `types` defines [`AuthError`], the crate-wide error taxonomy, and its
//!   mapping to HTTP status codes
//! - `conversion` renders errors as HTTP responses with the standard
//!   failure envelope
//!
//! Handlers and domain code return `Result<_, AuthError>` throughout; only
//! the conversion layer knows what an error looks like on the wire.

pub mod conversion;
pub mod types;

pub use types::AuthError;
