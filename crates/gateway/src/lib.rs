//! API Gateway Library
//!
//! The HTTP surface of the mess backend. Wires the auth, user and
//! reservation services over SQL or in-memory stores and serves them with
//! axum.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use persistence::Database;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server until Ctrl+C.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = match &config.database {
        Some(db_config) => {
            let database = Database::connect(db_config).await?;
            AppState::with_database(database, &config)
        }
        None => {
            warn!("no database URL configured, data is kept in memory only");
            AppState::in_memory(&config)
        }
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "messapp listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received shutdown signal, draining connections"),
        Err(e) => {
            error!(error = %e, "could not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
