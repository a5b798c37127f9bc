//! Auth service configuration.

use std::env;

use common::config::{env_var, JwtConfig};
use common::{AppError, AppResult};
use domain::{DEFAULT_SESSION_TTL_MINUTES, DEV_SIGNING_KEY, MAX_SESSION_TTL_MINUTES};

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Signing key and session lifetime
    pub jwt: JwtConfig,
}

impl AuthServiceConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt }
    }

    /// Load configuration from environment variables.
    ///
    /// Without `MESSAPP_JWT_SECRET` (or `JWT_SECRET`), debug builds sign with
    /// a fixed development key and release builds refuse to start.
    pub fn from_env() -> AppResult<Self> {
        let secret = match env_var("MESSAPP_JWT_SECRET", "JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("no JWT secret configured, using the development signing key");
                DEV_SIGNING_KEY.to_string()
            }
            _ => return Err(AppError::config("MESSAPP_JWT_SECRET must be set")),
        };

        let expiration_minutes = match env::var("MESSAPP_JWT_EXPIRATION_MINUTES") {
            Ok(raw) => parse_expiration_minutes(&raw)?,
            Err(_) => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            jwt: JwtConfig::new(secret, expiration_minutes),
        })
    }
}

/// Session lifetime must lie in `1..=MAX_SESSION_TTL_MINUTES`.
fn parse_expiration_minutes(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|m| (1..=MAX_SESSION_TTL_MINUTES).contains(m))
        .ok_or_else(|| {
            AppError::config(format!(
                "MESSAPP_JWT_EXPIRATION_MINUTES must be between 1 and {}, got {:?}",
                MAX_SESSION_TTL_MINUTES, raw
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiration_accepts_minutes_in_range() {
        assert_eq!(parse_expiration_minutes("90").unwrap(), 90);
        assert_eq!(
            parse_expiration_minutes(&MAX_SESSION_TTL_MINUTES.to_string()).unwrap(),
            MAX_SESSION_TTL_MINUTES
        );
    }

    #[test]
    fn expiration_rejects_values_chrono_cannot_add() {
        for raw in ["9223372036854775807", "1000000000000", "0", "-5", "soon"] {
            let err = parse_expiration_minutes(raw).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "accepted {raw}");
        }
    }
}
