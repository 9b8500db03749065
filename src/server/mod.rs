//! Server assembly and configuration.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Environment configuration (database, media root, port)
//! - **`init`** - Server initialization and app creation
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: token secrets, database URL, media root
//! 2. **Store Selection**: PostgreSQL when configured, in-memory otherwise
//! 3. **State Creation**: session manager and auth gate over the shared
//!    store and token codec
//! 4. **Router Creation**: routes, auth middleware, media serving

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
