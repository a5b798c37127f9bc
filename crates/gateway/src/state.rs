//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::{AuthService, Authenticator, LoggingAuthService};
use persistence::Database;
use reservation_service_lib::{
    LoggingReservationService, MemoryReservationStore, ReservationManager, ReservationRepository,
    ReservationStore, ReservationService,
};
use user_service_lib::{
    LoggingUserService, MemoryUserStore, UserManager, UserRepository, UserService, UserStore,
};

use crate::config::{AppConfig, GatewayConfig};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub reservations: Arc<dyn ReservationService>,
    /// Present when backed by SQL; used by the health check
    pub database: Option<Database>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Wire the services over the given stores, each wrapped in its logging
    /// decorator.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        reservation_repo: Arc<dyn ReservationRepository>,
        database: Option<Database>,
        config: &AppConfig,
    ) -> Self {
        let users = UserManager::new(user_repo.clone(), config.users.clone());
        let reservations = ReservationManager::new(reservation_repo);
        let auth = Authenticator::new(user_repo, config.auth.jwt.clone());

        Self {
            auth: Arc::new(LoggingAuthService::new(Arc::new(auth))),
            users: Arc::new(LoggingUserService::new(Arc::new(users))),
            reservations: Arc::new(LoggingReservationService::new(Arc::new(reservations))),
            database,
            config: config.server.clone(),
        }
    }

    /// State backed by the SQL stores.
    pub fn with_database(database: Database, config: &AppConfig) -> Self {
        let connection = database.get_connection();
        Self::new(
            Arc::new(UserStore::new(connection.clone())),
            Arc::new(ReservationStore::new(connection)),
            Some(database),
            config,
        )
    }

    /// State backed by process memory; nothing survives a restart.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryReservationStore::new()),
            None,
            config,
        )
    }
}
