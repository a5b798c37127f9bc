//! Reservation handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{Reservation, ReservationResponse, ReservationType};

use crate::extractors::{parse_date, parse_id, ValidatedJson};
use crate::state::AppState;

/// Reservation create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReservationRequest {
    #[schema(example = 17)]
    pub user_id: i64,
    pub reservation_time: DateTime<Utc>,
    /// Meal slot: 1 = breakfast, 2 = lunch, 3 = dinner
    #[serde(rename = "type")]
    #[schema(value_type = i32, example = 2)]
    pub reservation_type: ReservationType,
    #[serde(default)]
    pub no_of_guests: i64,
}

impl ReservationRequest {
    fn into_reservation(self, id: i64) -> Reservation {
        let mut reservation = Reservation::new(
            self.user_id,
            self.reservation_time,
            self.reservation_type,
            self.no_of_guests,
        );
        reservation.id = id;
        reservation
    }
}

fn respond(reservations: Vec<Reservation>) -> Json<Vec<ReservationResponse>> {
    Json(reservations.into_iter().map(ReservationResponse::from).collect())
}

/// Create reservation routes
pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/reservations",
            get(list_reservations).post(save_reservation),
        )
        .route("/v1/reservations/:date", get(reservations_by_date))
        .route("/v1/reservationsbyid/:user_id", get(reservations_by_user))
        .route(
            "/v1/reservation/:id",
            get(get_reservation)
                .put(update_reservation)
                .delete(remove_reservation),
        )
}

/// Book a reservation
#[utoipa::path(
    post,
    path = "/resvlist/v1/reservations",
    tag = "Reservations",
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation booked", body = ReservationResponse),
        (status = 400, description = "Malformed body or unknown meal type")
    )
)]
pub async fn save_reservation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReservationRequest>,
) -> AppResult<Json<ReservationResponse>> {
    let reservation = state.reservations.save(payload.into_reservation(0)).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// List all reservations
#[utoipa::path(
    get,
    path = "/resvlist/v1/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "All reservations", body = Vec<ReservationResponse>)
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    Ok(respond(state.reservations.list().await?))
}

/// Reservations on one day
#[utoipa::path(
    get,
    path = "/resvlist/v1/reservations/{date}",
    tag = "Reservations",
    params(
        ("date" = String, Path, description = "UTC day as YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Reservations on that day", body = Vec<ReservationResponse>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn reservations_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    let date = parse_date(&date)?;
    Ok(respond(state.reservations.find_by_date(date).await?))
}

/// Reservations owned by one user
#[utoipa::path(
    get,
    path = "/resvlist/v1/reservationsbyid/{user_id}",
    tag = "Reservations",
    params(
        ("user_id" = i64, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "The user's reservations", body = Vec<ReservationResponse>),
        (status = 400, description = "Non-numeric id")
    )
)]
pub async fn reservations_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    let user_id = parse_id(&user_id, "user")?;
    Ok(respond(state.reservations.find_by_employee_id(user_id).await?))
}

/// Get a reservation by id
#[utoipa::path(
    get,
    path = "/resvlist/v1/reservation/{id}",
    tag = "Reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "The reservation", body = ReservationResponse),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReservationResponse>> {
    let id = parse_id(&id, "reservation")?;
    let reservation = state.reservations.find_by_id(id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// Update a reservation, creating it when the id is unknown
#[utoipa::path(
    put,
    path = "/resvlist/v1/reservation/{id}",
    tag = "Reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationResponse),
        (status = 201, description = "No such reservation, created instead", body = ReservationResponse),
        (status = 400, description = "Non-numeric id or malformed body")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    let id = parse_id(&id, "reservation")?;
    let upsert = state.reservations.update(payload.into_reservation(id)).await?;

    let status = if upsert.was_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ReservationResponse::from(upsert.into_inner()))))
}

/// Cancel a reservation
#[utoipa::path(
    delete,
    path = "/resvlist/v1/reservation/{id}",
    tag = "Reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 204, description = "Reservation cancelled"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn remove_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "reservation")?;
    state.reservations.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
