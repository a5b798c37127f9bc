//! Auth Service Library
//!
//! Staff login: checks credentials against the user repository and issues
//! stateless JWT session tokens.

pub mod config;
pub mod service;

pub use config::AuthServiceConfig;
pub use service::{AuthService, Authenticator, Claims, LoggingAuthService, Session};
