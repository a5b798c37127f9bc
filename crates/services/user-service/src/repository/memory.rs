//! In-memory user repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::user_repository::{UserRepository, USER};
use common::{AppError, AppResult, OptionExt};
use domain::{UpdateOutcome, User};

/// User repository kept in process memory.
///
/// Used when no database is configured and by tests. Contents are lost when
/// the store is dropped.
#[derive(Default)]
pub struct MemoryUserStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn employee_id_taken(state: &State, user: &User) -> bool {
    user.is_active
        && state
            .users
            .values()
            .any(|u| u.id != user.id && u.is_active && u.employee_id == user.employee_id)
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut state = self.state.write().await;
        user.id = 0;
        if employee_id_taken(&state, &user) {
            return Err(AppError::conflict(USER));
        }

        state.last_id += 1;
        user.id = state.last_id;
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        self.state
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_not_found(USER)
    }

    async fn find_by_employee_id(&self, employee_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.is_active && u.employee_id == employee_id)
            .cloned())
    }

    async fn update(&self, mut user: User) -> AppResult<UpdateOutcome<User>> {
        let mut state = self.state.write().await;
        if employee_id_taken(&state, &user) {
            return Err(AppError::conflict(USER));
        }

        let Some(existing) = state.users.get_mut(&user.id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        user.created_at = existing.created_at;
        *existing = user.clone();
        Ok(UpdateOutcome::Updated(user))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        match self.state.write().await.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(USER)),
        }
    }
}
