//! Authentication service - Issues session tokens for staff logins.
//!
//! Tokens are stateless HS256 JWTs; nothing is stored server-side, so logout
//! has nothing to revoke.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use common::config::JwtConfig;
use common::{AppError, AppResult, OptionExt};
use domain::User;
use user_service_lib::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub name: String,
    pub designation: String,
    #[serde(rename = "employeeid")]
    pub employee_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub iat: i64,
    pub exp: i64,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated user, as stored
    pub user: User,
    /// Signed session token
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a session token
    async fn login(&self, employee_id: String, password: String) -> AppResult<Session>;

    /// End a session
    async fn logout(&self, token: String) -> AppResult<()>;

    /// Verify a session token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Sign a session token for `user`
    fn issue_token(&self, user: &User) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(self.jwt.expiration_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::config(format!(
                    "session lifetime of {} minutes is out of range",
                    self.jwt.expiration_minutes
                ))
            })?;

        let claims = Claims {
            id: user.id,
            name: user.name.clone(),
            designation: user.designation.clone(),
            employee_id: user.employee_id.clone(),
            created_at: user.created_at,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret_bytes()),
        )?;

        Ok((token, expires_at))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, employee_id: String, password: String) -> AppResult<Session> {
        let user = self
            .users
            .find_by_employee_id(&employee_id)
            .await?
            .ok_or_not_found("user")?;

        if !user.password_matches(&password) {
            return Err(AppError::InvalidCredentials);
        }

        let (token, expires_at) = self.issue_token(&user)?;
        Ok(Session {
            user,
            token,
            expires_at,
        })
    }

    async fn logout(&self, _token: String) -> AppResult<()> {
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
