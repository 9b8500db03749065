//! Route configuration.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - User API endpoints (register, login, tokens)
//!
//! # Route Organization
//!
//! Routes are added in a fixed order:
//!
//! 1. **Health check** - `GET /health`
//! 2. **API routes** - `/api/v1/users/*`, public and protected
//! 3. **Media files** - `GET /media/*` serves uploaded avatars
//! 4. **Fallback** - 404 for everything else

/// Main router creation
pub mod router;

/// API endpoint configuration
pub mod api_routes;

pub use router::create_router;
