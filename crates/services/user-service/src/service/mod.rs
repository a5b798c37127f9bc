mod logging;
mod user_service;

pub use logging::LoggingUserService;
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
