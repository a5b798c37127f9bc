//! User service - Handles staff record management.
//!
//! Orchestrates the user repository: stamps server-assigned fields on save,
//! applies the upsert policy on update and annotates storage failures.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::{AppResult, ResultExt};
use domain::{UpdateOutcome, Upsert, User};

use crate::config::UserServiceConfig;
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user with the server-assigned default password
    async fn save(&self, user: User) -> AppResult<User>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Update the user with the same id, inserting it when no such user exists
    async fn update(&self, user: User) -> AppResult<Upsert<User>>;

    /// Delete a user by id
    async fn remove(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    config: UserServiceConfig,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>, config: UserServiceConfig) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn save(&self, mut user: User) -> AppResult<User> {
        user.created_at = Utc::now();
        user.password = self.config.default_password.clone();

        self.repo.insert(user).await.context("could not save user")
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await.context("could not list all users")
    }

    async fn update(&self, user: User) -> AppResult<Upsert<User>> {
        let fallback = user.clone();

        match self.repo.update(user).await.context("could not update user")? {
            UpdateOutcome::Updated(user) => Ok(Upsert::Updated(user)),
            UpdateOutcome::NotFound => {
                let mut user = fallback;
                user.created_at = Utc::now();
                let created = self.repo.insert(user).await.context("could not create user")?;
                Ok(Upsert::Created(created))
            }
        }
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.repo
            .delete_by_id(id)
            .await
            .context_unless_not_found("could not remove user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryUserStore, MockUserRepository};
    use common::AppError;
    use mockall::predicate::eq;

    fn manager(repo: impl UserRepository + 'static) -> UserManager {
        UserManager::new(Arc::new(repo), UserServiceConfig::default())
    }

    #[tokio::test]
    async fn save_assigns_default_password_and_creation_time() {
        let service = manager(MemoryUserStore::new());
        let before = Utc::now();
        let mut user = User::new("Asha", "Engineer", "E-100");
        user.password = "chosen-by-client".to_string();

        let saved = service.save(user).await.unwrap();

        assert_ne!(saved.id, 0);
        assert_eq!(saved.password, domain::DEFAULT_USER_PASSWORD);
        assert!(saved.created_at >= before);
    }

    #[tokio::test]
    async fn save_uses_configured_default_password() {
        let config = UserServiceConfig {
            default_password: "welcome-1".to_string(),
        };
        let service = UserManager::new(Arc::new(MemoryUserStore::new()), config);

        let saved = service.save(User::new("Asha", "Engineer", "E-100")).await.unwrap();

        assert_eq!(saved.password, "welcome-1");
    }

    #[tokio::test]
    async fn list_wraps_repository_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|| Err(AppError::internal("connection refused")));

        let err = manager(repo).list().await.unwrap_err();

        assert!(matches!(err, AppError::Repository { context: "could not list all users", .. }));
    }

    #[tokio::test]
    async fn update_existing_user_keeps_id() {
        let store = Arc::new(MemoryUserStore::new());
        let service = UserManager::new(store.clone(), UserServiceConfig::default());
        let saved = service.save(User::new("Asha", "Engineer", "E-100")).await.unwrap();

        let mut changed = saved.clone();
        changed.password = "new-secret".to_string();
        let upsert = service.update(changed).await.unwrap();

        assert!(!upsert.was_created());
        assert_eq!(upsert.record().id, saved.id);
        assert_eq!(upsert.record().password, "new-secret");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_unknown_user_inserts_it() {
        let service = manager(MemoryUserStore::new());
        let mut user = User::new("Ravi", "Chef", "E-200");
        user.id = 999;
        user.password = "kept".to_string();

        let (created, was_created) = service.update(user).await.unwrap().into_parts();

        assert!(was_created);
        assert_ne!(created.id, 999);
        assert_eq!(created.password, "kept");
    }

    #[tokio::test]
    async fn update_failure_is_wrapped() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .returning(|_| Err(AppError::internal("deadlock")));
        repo.expect_insert().never();

        let err = manager(repo).update(User::new("A", "B", "C")).await.unwrap_err();

        assert!(matches!(err, AppError::Repository { context: "could not update user", .. }));
    }

    #[tokio::test]
    async fn failed_fallback_insert_is_wrapped() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_| Ok(UpdateOutcome::NotFound));
        repo.expect_insert()
            .returning(|_| Err(AppError::conflict("user")));

        let err = manager(repo).update(User::new("A", "B", "C")).await.unwrap_err();

        assert!(matches!(err, AppError::Repository { context: "could not create user", .. }));
        assert_eq!(err.status().as_u16(), 409);
    }

    #[tokio::test]
    async fn remove_passes_not_found_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_by_id()
            .with(eq(7))
            .returning(|_| Err(AppError::not_found("user")));

        let err = manager(repo).remove(7).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn remove_wraps_other_failures() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_by_id()
            .returning(|_| Err(AppError::internal("disk full")));

        let err = manager(repo).remove(7).await.unwrap_err();

        assert!(matches!(err, AppError::Repository { context: "could not remove user", .. }));
    }
}
