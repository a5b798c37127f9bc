//! Logging decorator for [`AuthService`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info_span;

use common::{observe, AppResult, CallRecord};

use super::{AuthService, Claims, Session};

/// Logs every [`AuthService`] call with the employee id, duration and
/// error. Credentials and tokens are never recorded.
pub struct LoggingAuthService {
    inner: Arc<dyn AuthService>,
}

impl LoggingAuthService {
    pub fn new(inner: Arc<dyn AuthService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AuthService for LoggingAuthService {
    async fn login(&self, employee_id: String, password: String) -> AppResult<Session> {
        let span = info_span!("auth_service", employee_id = %employee_id);
        observe(span, "login", self.inner.login(employee_id, password)).await
    }

    async fn logout(&self, token: String) -> AppResult<()> {
        observe(info_span!("auth_service"), "logout", self.inner.logout(token)).await
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let mut record = CallRecord::start(info_span!("auth_service"), "verify_token");
        let result = self.inner.verify_token(token);
        record.finish(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockAuthService;
    use common::AppError;

    #[tokio::test]
    async fn login_failure_is_returned_untouched() {
        let mut inner = MockAuthService::new();
        inner
            .expect_login()
            .times(1)
            .returning(|_, _| Err(AppError::InvalidCredentials));
        let service = LoggingAuthService::new(Arc::new(inner));

        let err = service
            .login("EMP-1".to_string(), "nope".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_is_forwarded() {
        let mut inner = MockAuthService::new();
        inner.expect_logout().times(1).returning(|_| Ok(()));
        let service = LoggingAuthService::new(Arc::new(inner));

        tokio_test::assert_ok!(service.logout("token".to_string()).await);
    }

    #[test]
    fn verify_token_is_forwarded() {
        let mut inner = MockAuthService::new();
        inner
            .expect_verify_token()
            .withf(|token| token == "abc")
            .times(1)
            .returning(|_| Err(AppError::Unauthorized));
        let service = LoggingAuthService::new(Arc::new(inner));

        let err = service.verify_token("abc").unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }
}
