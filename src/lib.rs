//! ClipTube Auth - authentication and session service.
//!
//! Backend for a video-sharing platform's user accounts: registration with
//! avatar upload, credential login, JWT access/refresh token issuance,
//! refresh token rotation, logout and password changes.
//!
//! # Overview
//!
//! - Passwords are stored as bcrypt hashes (work factor 10)
//! - Access tokens are short-lived JWTs carrying identity claims; refresh
//!   tokens are long-lived JWTs carrying only the user id
//! - Each user has at most one active refresh token; rotation swaps it with
//!   a compare-and-swap so a replayed token can never fork a session
//! - Tokens travel both in JSON responses and in HttpOnly cookies
//!
//! # Module Structure
//!
//! - **`auth`** - Password hashing, token codec, session manager, auth gate
//! - **`store`** - User persistence (PostgreSQL or in-memory)
//! - **`media`** - Avatar and cover image uploads
//! - **`handlers`** - HTTP handlers for the user endpoints
//! - **`middleware`** - Access token authentication layer
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, application state, initialization
//!
//! # Usage
//!
//! ```rust,no_run
//! use cliptube_auth::server::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Serve with axum::serve
//! # }
//! ```

/// Core authentication and session logic
pub mod auth;

/// Time source abstraction for token expiry
pub mod clock;

/// Session cookie construction and extraction
pub mod cookies;

/// Error taxonomy and HTTP conversion
pub mod error;

/// HTTP request handlers
pub mod handlers;

/// Media upload storage
pub mod media;

/// HTTP middleware
pub mod middleware;

/// Response envelope
pub mod response;

/// Route configuration
pub mod routes;

/// Server state and initialization
pub mod server;

/// User record persistence
pub mod store;
