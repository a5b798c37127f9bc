//! messapp - canteen staff and meal reservation backend.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use common::config::{load_dotenv, DatabaseConfig};
use common::AppError;
use gateway_lib::config::AppConfig;
use persistence::{apply_migrations, Database, MigrateAction};

#[derive(Parser)]
#[command(name = "messapp")]
#[command(about = "Canteen staff and meal reservation backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides MESSAPP_SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides MESSAPP_SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Manage the database schema
    Migrate {
        #[command(subcommand)]
        action: MigrateCommand,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateCommand {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateCommand> for MigrateAction {
    fn from(command: MigrateCommand) -> Self {
        match command {
            MigrateCommand::Up => MigrateAction::Up,
            MigrateCommand::Down => MigrateAction::Down,
            MigrateCommand::Status => MigrateAction::Status,
            MigrateCommand::Fresh => MigrateAction::Fresh,
        }
    }
}

/// Load `.env`, then build the log filter so a `RUST_LOG` from the file applies.
fn load_environment() -> (Option<PathBuf>, EnvFilter) {
    let env_file = load_dotenv();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());
    (env_file, filter)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (env_file, filter) = load_environment();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = env_file {
        info!(path = %path.display(), "loaded environment file");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = AppConfig::from_env()?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            gateway_lib::run(config).await?;
        }
        Commands::Migrate { action } => {
            let db_config = DatabaseConfig::from_env()
                .ok_or_else(|| AppError::config("MESSAPP_DATABASE_URL must be set to migrate"))?;
            let db = Database::connect_without_migrations(&db_config).await?;

            let states = apply_migrations(&db, action.into()).await?;
            for state in states {
                let marker = if state.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, state.name);
            }
        }
    }

    Ok(())
}
