//! Database connection and initialization.

use std::time::Duration;

use common::DatabaseConfig;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};

use crate::migrations::{self, MigrateAction};

/// Pooled connection to the mess database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;
        migrations::apply(&db, MigrateAction::Up).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "database connected and migrations applied"
        );
        Ok(db)
    }

    /// Connect without touching the schema (for CLI commands).
    pub async fn connect_without_migrations(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self { connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Clone of the pooled connection handle, for handing to a store.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Round-trip a trivial query to check connectivity.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }
}
