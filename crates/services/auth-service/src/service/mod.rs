//! Authentication service business logic.

mod auth_service;
mod logging;

pub use auth_service::{AuthService, Authenticator, Claims, Session};
pub use logging::LoggingAuthService;

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
