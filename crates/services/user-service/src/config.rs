//! User service configuration.

use std::env;

use domain::DEFAULT_USER_PASSWORD;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Password assigned to every newly registered user
    pub default_password: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            default_password: env::var("MESSAPP_DEFAULT_USER_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_USER_PASSWORD.to_string()),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            default_password: DEFAULT_USER_PASSWORD.to_string(),
        }
    }
}
