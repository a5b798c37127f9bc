//! Persistence bootstrap shared by the service stores.
//!
//! Owns the database connection wrapper and the single migrator for the
//! users and reservations tables.

mod db;
pub mod migrations;

pub use db::Database;
pub use migrations::{apply as apply_migrations, MigrateAction, MigrationState, Migrator};
