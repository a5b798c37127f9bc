//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{UpdateOutcome, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entity name used in not-found and conflict errors.
pub(crate) const USER: &str = "user";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; the returned copy carries the assigned id.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// List every user.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by storage id, failing with `NotFound` if absent.
    async fn find_by_id(&self, id: i64) -> AppResult<User>;

    /// Find the active user holding `employee_id`.
    async fn find_by_employee_id(&self, employee_id: &str) -> AppResult<Option<User>>;

    /// Overwrite the user with the same id.
    async fn update(&self, user: User) -> AppResult<UpdateOutcome<User>>;

    /// Delete by storage id, failing with `NotFound` if absent.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed user repository.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, user: User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(user.name),
            password: Set(user.password),
            designation: Set(user.designation),
            employee_id: Set(user.employee_id),
            is_active: Set(user.is_active),
            is_admin: Set(user.is_admin),
            created_at: Set(user.created_at),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, USER))?;
        Ok(User::from(model))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or_not_found(USER)
    }

    async fn find_by_employee_id(&self, employee_id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::EmployeeId.eq(employee_id))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn update(&self, user: User) -> AppResult<UpdateOutcome<User>> {
        let Some(existing) = UserEntity::find_by_id(user.id).one(&self.db).await? else {
            return Ok(UpdateOutcome::NotFound);
        };

        // Identity and creation time are never rewritten
        let mut active: ActiveModel = existing.into();
        active.name = Set(user.name);
        active.password = Set(user.password);
        active.designation = Set(user.designation);
        active.employee_id = Set(user.employee_id);
        active.is_active = Set(user.is_active);
        active.is_admin = Set(user.is_admin);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, USER))?;
        Ok(UpdateOutcome::Updated(User::from(model)))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(USER));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::DatabaseConfig;
    use persistence::Database;

    async fn sqlite_store() -> UserStore {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 5,
        };
        let db = Database::connect(&config).await.unwrap();
        UserStore::new(db.get_connection())
    }

    #[tokio::test]
    async fn deactivated_employee_id_can_be_reused() {
        let store = sqlite_store().await;
        let mut first = store.insert(User::new("A", "Cook", "E-1")).await.unwrap();

        first.is_active = false;
        store.update(first).await.unwrap();
        let second = store.insert(User::new("B", "Cook", "E-1")).await.unwrap();

        let found = store.find_by_employee_id("E-1").await.unwrap().unwrap();
        assert_eq!(found.id, second.id);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_active_employee_id_conflicts() {
        let store = sqlite_store().await;
        store.insert(User::new("A", "Cook", "E-1")).await.unwrap();

        let err = store.insert(User::new("B", "Cook", "E-1")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref entity) if entity == USER));
    }
}
