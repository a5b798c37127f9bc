//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Employee identifier staff log in with
    #[serde(rename = "employeeid")]
    #[validate(length(min = 1, message = "employeeid is required"))]
    #[schema(example = "EMP-042")]
    pub employee_id: String,
    #[schema(example = "password@1234")]
    pub password: String,
}

/// Login response: the user's profile plus a session token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    pub designation: String,
    #[serde(rename = "employeeid")]
    pub employee_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// HS256 session token
    pub token: String,
}

/// Logout request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LogoutRequest {
    pub token: String,
}

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/login", post(login))
        .route("/v1/logout", post(logout))
}

/// Login with employee id and password
#[utoipa::path(
    post,
    path = "/auth/v1/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Login failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // The client only learns that login failed, never why
    let session = state
        .auth
        .login(payload.employee_id, payload.password)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "login rejected");
            AppError::InvalidCredentials
        })?;

    let user = session.user;
    Ok(Json(LoginResponse {
        id: user.id,
        name: user.name,
        designation: user.designation,
        employee_id: user.employee_id,
        created_at: user.created_at,
        token: session.token,
    }))
}

/// End a session
#[utoipa::path(
    post,
    path = "/auth/v1/logout",
    tag = "Authentication",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out"),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LogoutRequest>,
) -> AppResult<StatusCode> {
    state.auth.logout(payload.token).await?;
    Ok(StatusCode::OK)
}
