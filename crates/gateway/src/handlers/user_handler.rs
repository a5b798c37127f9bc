//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{User, UserResponse};

use crate::extractors::{parse_id, ValidatedJson};
use crate::state::AppState;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    /// Ignored; the default credential is assigned
    #[serde(default)]
    pub password: String,
    #[schema(example = "Head Chef")]
    pub designation: String,
    #[serde(rename = "employeeid")]
    #[validate(length(min = 1, message = "employeeid is required"))]
    #[schema(example = "EMP-042")]
    pub employee_id: String,
    /// Defaults to true
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    /// Defaults to false
    #[serde(rename = "isAdmin")]
    pub is_admin: Option<bool>,
}

/// User update request; the stored password is replaced, so it must be given
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserUpdateRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[schema(example = "Head Chef")]
    pub designation: String,
    #[serde(rename = "employeeid")]
    #[validate(length(min = 1, message = "employeeid is required"))]
    #[schema(example = "EMP-042")]
    pub employee_id: String,
    /// Defaults to true
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    /// Defaults to false
    #[serde(rename = "isAdmin")]
    pub is_admin: Option<bool>,
}

impl UserRequest {
    fn into_user(self, id: i64) -> User {
        let mut user = User::new(self.name, self.designation, self.employee_id);
        user.id = id;
        user.password = self.password;
        user.is_active = self.is_active.unwrap_or(true);
        user.is_admin = self.is_admin.unwrap_or(false);
        user
    }
}

impl From<UserUpdateRequest> for UserRequest {
    fn from(req: UserUpdateRequest) -> Self {
        Self {
            name: req.name,
            password: req.password,
            designation: req.designation,
            employee_id: req.employee_id,
            is_active: req.is_active,
            is_admin: req.is_admin,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/users", post(save_user).get(list_users))
        .route("/v1/user/:id", put(update_user).delete(remove_user))
}

/// Register a user
#[utoipa::path(
    post,
    path = "/userlist/v1/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Employee id already in use")
    )
)]
pub async fn save_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.save(payload.into_user(0)).await?;
    Ok(Json(UserResponse::from(user)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/userlist/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Update a user, creating it when the id is unknown
#[utoipa::path(
    put,
    path = "/userlist/v1/user/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 201, description = "No such user, created instead", body = UserResponse),
        (status = 400, description = "Non-numeric id, missing password or validation error")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UserUpdateRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let id = parse_id(&id, "user")?;
    let user = UserRequest::from(payload).into_user(id);
    let (user, created) = state.users.update(user).await?.into_parts();

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(UserResponse::from(user))))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/userlist/v1/user/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "user")?;
    state.users.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
