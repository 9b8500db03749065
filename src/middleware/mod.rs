//! HTTP middleware.
//!
//! Currently just the authentication layer: [`auth::require_auth`] guards
//! protected routes and [`auth::CurrentUser`] gives handlers typed access
//! to the authenticated user.

pub mod auth;

pub use auth::{require_auth, CurrentUser};
