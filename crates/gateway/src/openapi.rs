//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{LoginRequest, LoginResponse, LogoutRequest};
use crate::handlers::reservation_handler::ReservationRequest;
use crate::handlers::user_handler::{UserRequest, UserUpdateRequest};
use domain::{ReservationResponse, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::user_handler::save_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::remove_user,
        crate::handlers::reservation_handler::save_reservation,
        crate::handlers::reservation_handler::list_reservations,
        crate::handlers::reservation_handler::reservations_by_date,
        crate::handlers::reservation_handler::reservations_by_user,
        crate::handlers::reservation_handler::get_reservation,
        crate::handlers::reservation_handler::update_reservation,
        crate::handlers::reservation_handler::remove_reservation,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LogoutRequest,
            UserRequest,
            UserUpdateRequest,
            UserResponse,
            ReservationRequest,
            ReservationResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Staff login and logout"),
        (name = "Users", description = "Staff record management"),
        (name = "Reservations", description = "Meal reservations"),
    )
)]
pub struct ApiDoc;
