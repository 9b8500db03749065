//! HTTP handlers for the user endpoints.
//!
//! One file per operation, plus shared request/response types:
//!
//! ```text
//! handlers/
//! ├── types.rs      request and response DTOs
//! ├── register.rs   POST /api/v1/users/register (multipart)
//! ├── login.rs      POST /api/v1/users/login
//! ├── logout.rs     POST /api/v1/users/logout
//! ├── refresh.rs    POST /api/v1/users/refresh-token
//! ├── password.rs   POST /api/v1/users/change-password
//! └── me.rs         GET  /api/v1/users/current-user
//! ```
//!
//! Handlers stay thin: extract input, call the session manager or gate,
//! wrap the result in the response envelope, attach cookies where needed.

pub mod login;
pub mod logout;
pub mod me;
pub mod password;
pub mod refresh;
pub mod register;
pub mod types;

pub use login::login;
pub use logout::logout;
pub use me::get_current_user;
pub use password::change_password;
pub use refresh::refresh_token;
pub use register::register;
