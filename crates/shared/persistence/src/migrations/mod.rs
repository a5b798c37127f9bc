//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm::DbErr;
use sea_orm_migration::{prelude::*, MigrationStatus};

use crate::Database;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_reservations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_reservations_table::Migration),
        ]
    }
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
    /// Report which migrations are applied
    Status,
    /// Drop everything and re-apply all migrations
    Fresh,
}

/// Applied state of one migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Run `action` against `db` and report the resulting migration states.
pub async fn apply(db: &Database, action: MigrateAction) -> Result<Vec<MigrationState>, DbErr> {
    let conn = db.connection();
    match action {
        MigrateAction::Up => Migrator::up(conn, None).await?,
        MigrateAction::Down => Migrator::down(conn, Some(1)).await?,
        MigrateAction::Fresh => Migrator::fresh(conn).await?,
        MigrateAction::Status => {}
    }

    // Installs the tracking table first, so this also works on an empty database
    Ok(Migrator::get_migration_with_status(conn)
        .await?
        .iter()
        .map(|m| MigrationState {
            name: m.name().to_string(),
            applied: m.status() == MigrationStatus::Applied,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::DatabaseConfig;

    async fn sqlite() -> Database {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 5,
        };
        Database::connect_without_migrations(&config).await.unwrap()
    }

    #[tokio::test]
    async fn status_on_empty_database_lists_everything_pending() {
        let db = sqlite().await;

        let states = apply(&db, MigrateAction::Status).await.unwrap();

        assert_eq!(states.len(), Migrator::migrations().len());
        assert!(states.iter().all(|s| !s.applied));
    }

    #[tokio::test]
    async fn up_then_down_rolls_back_only_the_latest() {
        let db = sqlite().await;

        let after_up = apply(&db, MigrateAction::Up).await.unwrap();
        assert!(after_up.iter().all(|s| s.applied));

        let after_down = apply(&db, MigrateAction::Down).await.unwrap();
        let applied: Vec<bool> = after_down.iter().map(|s| s.applied).collect();
        assert_eq!(applied, vec![true, false]);
    }
}
