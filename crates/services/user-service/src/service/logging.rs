//! Logging decorator for [`UserService`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info_span;

use common::{observe, AppResult};
use domain::{Upsert, User};

use super::UserService;

/// Wraps a [`UserService`] and logs every call with its arguments, duration
/// and error. Results are returned unchanged.
pub struct LoggingUserService {
    inner: Arc<dyn UserService>,
}

impl LoggingUserService {
    pub fn new(inner: Arc<dyn UserService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl UserService for LoggingUserService {
    async fn save(&self, user: User) -> AppResult<User> {
        let span = info_span!(
            "user_service",
            name = %user.name,
            employee_id = %user.employee_id,
        );
        observe(span, "save", self.inner.save(user)).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        observe(info_span!("user_service"), "list", self.inner.list()).await
    }

    async fn update(&self, user: User) -> AppResult<Upsert<User>> {
        let span = info_span!("user_service", id = user.id, name = %user.name);
        observe(span, "update", self.inner.update(user)).await
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        observe(info_span!("user_service", id), "remove", self.inner.remove(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockUserService;
    use common::AppError;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn forwards_results_unchanged() {
        let mut inner = MockUserService::new();
        inner.expect_update().times(1).returning(|mut user| {
            user.id = 12;
            Ok(Upsert::Created(user))
        });
        let service = LoggingUserService::new(Arc::new(inner));

        let upsert = service.update(User::new("Asha", "Engineer", "E-1")).await.unwrap();

        assert!(upsert.was_created());
        assert_eq!(upsert.record().id, 12);
    }

    #[tokio::test]
    async fn forwards_errors_unchanged() {
        let mut inner = MockUserService::new();
        inner
            .expect_remove()
            .with(eq(3))
            .times(1)
            .returning(|_| Err(AppError::not_found("user")));
        let service = LoggingUserService::new(Arc::new(inner));

        let err = service.remove(3).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref e) if e == "user"));
    }

    #[tokio::test]
    async fn calls_inner_exactly_once() {
        let mut inner = MockUserService::new();
        inner.expect_list().times(1).returning(|| Ok(vec![]));
        let service = LoggingUserService::new(Arc::new(inner));

        assert!(service.list().await.unwrap().is_empty());
    }
}
