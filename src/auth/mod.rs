//! Core authentication and session logic.
//!
//! # Architecture
//!
//! Two entry points sit on top of the shared token codec and user store:
//!
//! - [`SessionManager`] drives state-changing operations: register, login,
//!   refresh rotation, logout, password change
//! - [`AuthGate`] is the read side: it turns a bearer access token into the
//!   current user for protected routes
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── password.rs   bcrypt hashing and verification
//! ├── tokens.rs     JWT signing and verification, token pair issuance
//! ├── session.rs    account and session lifecycle operations
//! └── gate.rs       access token validation for protected routes
//! ```

pub mod gate;
pub mod password;
pub mod session;
pub mod tokens;

pub use gate::AuthGate;
pub use session::{LoginInput, RegisterInput, SessionManager};
pub use tokens::{AccessClaims, RefreshClaims, TokenCodec, TokenConfig, TokenError, TokenPair};
