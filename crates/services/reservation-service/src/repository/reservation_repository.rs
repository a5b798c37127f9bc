//! Reservation repository contract and its SeaORM implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, SelectTwo, Set,
};

use super::entities::employee;
use super::entities::reservation::{self, ActiveModel, Entity as ReservationEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{Reservation, UpdateOutcome};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entity name used in not-found and conflict errors.
pub(crate) const RESERVATION: &str = "reservation";

/// Reservation repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation, assigning its id and creation time.
    async fn insert(&self, reservation: Reservation) -> AppResult<Reservation>;

    async fn find_all(&self) -> AppResult<Vec<Reservation>>;

    /// Find by storage id, failing with `NotFound` if absent.
    async fn find_by_id(&self, id: i64) -> AppResult<Reservation>;

    /// All reservations owned by `user_id`.
    async fn find_by_employee_id(&self, user_id: i64) -> AppResult<Vec<Reservation>>;

    /// All reservations whose slot falls on `date` (UTC).
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>>;

    /// Overwrite the reservation with the same id.
    async fn update(&self, reservation: Reservation) -> AppResult<UpdateOutcome<Reservation>>;

    /// Delete by storage id, failing with `NotFound` if absent.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// Half-open UTC range `[start, end)` covering `date`.
pub(crate) fn day_bounds(date: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| AppError::validation(format!("date {} is out of range", date)))?;

    Ok((
        date.and_time(NaiveTime::default()).and_utc(),
        next.and_time(NaiveTime::default()).and_utc(),
    ))
}

/// SeaORM-backed reservation repository.
///
/// Reads join the owning user to fill the reservation's display name.
pub struct ReservationStore {
    db: DatabaseConnection,
}

impl ReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn with_owner() -> SelectTwo<ReservationEntity, employee::Entity> {
        ReservationEntity::find().find_also_related(employee::Entity)
    }

    async fn load(
        &self,
        query: SelectTwo<ReservationEntity, employee::Entity>,
    ) -> AppResult<Vec<Reservation>> {
        query
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(model, owner)| model.into_domain(owner))
            .collect()
    }

    async fn owner_of(&self, model: reservation::Model) -> AppResult<Reservation> {
        let owner = employee::Entity::find_by_id(model.user_id).one(&self.db).await?;
        model.into_domain(owner)
    }
}

#[async_trait]
impl ReservationRepository for ReservationStore {
    async fn insert(&self, reservation: Reservation) -> AppResult<Reservation> {
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(reservation.user_id),
            reservation_time: Set(reservation.reservation_time),
            reservation_type: Set(reservation.reservation_type.ordinal()),
            no_of_guests: Set(reservation.no_of_guests),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, RESERVATION))?;
        self.owner_of(model).await
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        self.load(Self::with_owner().order_by_asc(reservation::Column::Id))
            .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Reservation> {
        let (model, owner) = ReservationEntity::find_by_id(id)
            .find_also_related(employee::Entity)
            .one(&self.db)
            .await?
            .ok_or_not_found(RESERVATION)?;

        model.into_domain(owner)
    }

    async fn find_by_employee_id(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        let query = Self::with_owner()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_asc(reservation::Column::ReservationTime);
        self.load(query).await
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        let (start, end) = day_bounds(date)?;
        let query = Self::with_owner()
            .filter(reservation::Column::ReservationTime.gte(start))
            .filter(reservation::Column::ReservationTime.lt(end))
            .order_by_asc(reservation::Column::ReservationTime);
        self.load(query).await
    }

    async fn update(&self, reservation: Reservation) -> AppResult<UpdateOutcome<Reservation>> {
        let Some(existing) = ReservationEntity::find_by_id(reservation.id)
            .one(&self.db)
            .await?
        else {
            return Ok(UpdateOutcome::NotFound);
        };

        // Creation time is kept from the stored row
        let mut active: ActiveModel = existing.into();
        active.user_id = Set(reservation.user_id);
        active.reservation_time = Set(reservation.reservation_time);
        active.reservation_type = Set(reservation.reservation_type.ordinal());
        active.no_of_guests = Set(reservation.no_of_guests);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, RESERVATION))?;
        Ok(UpdateOutcome::Updated(self.owner_of(model).await?))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = ReservationEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(RESERVATION));
        }

        Ok(())
    }
}
