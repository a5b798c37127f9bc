//! Gateway configuration.

use std::env;
use std::time::Duration;

use auth_service_lib::AuthServiceConfig;
use common::config::{env_var, DatabaseConfig};
use common::AppResult;
use user_service_lib::UserServiceConfig;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Requests running longer than this are cancelled
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env_var("MESSAPP_SERVER_HOST", "SERVER_HOST").unwrap_or(defaults.host),
            port: env_var("MESSAPP_SERVER_PORT", "SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_secs: env::var("MESSAPP_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8085,
            request_timeout_secs: 15,
        }
    }
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: GatewayConfig,
    /// `None` keeps all data in memory
    pub database: Option<DatabaseConfig>,
    pub users: UserServiceConfig,
    pub auth: AuthServiceConfig,
}

impl AppConfig {
    /// Load every section from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            server: GatewayConfig::from_env(),
            database: DatabaseConfig::from_env(),
            users: UserServiceConfig::from_env(),
            auth: AuthServiceConfig::from_env()?,
        })
    }
}
