//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: ServiceStatus,
}

/// Individual dependency status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub database: ServiceHealth,
}

/// Dependency health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - pings the database when one is configured.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.database {
        None => ServiceHealth {
            status: "in-memory",
            error: None,
        },
        Some(db) => match db.ping().await {
            Ok(()) => ServiceHealth {
                status: "healthy",
                error: None,
            },
            Err(e) => ServiceHealth {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        },
    };

    let healthy = database.status != "unhealthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceStatus { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
