//! Reservation service - Handles meal reservation management.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use common::{AppResult, ResultExt};
use domain::{Reservation, UpdateOutcome, Upsert};

use crate::repository::ReservationRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reservation service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Book a reservation
    async fn save(&self, reservation: Reservation) -> AppResult<Reservation>;

    /// List all reservations
    async fn list(&self) -> AppResult<Vec<Reservation>>;

    /// Get a reservation by id
    async fn find_by_id(&self, id: i64) -> AppResult<Reservation>;

    /// Get every reservation owned by a user
    async fn find_by_employee_id(&self, user_id: i64) -> AppResult<Vec<Reservation>>;

    /// Get every reservation whose slot falls on the given UTC day
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>>;

    /// Update the reservation with the same id, inserting it when absent
    async fn update(&self, reservation: Reservation) -> AppResult<Upsert<Reservation>>;

    /// Cancel a reservation by id
    async fn remove(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of ReservationService using repository.
///
/// No business validation is applied: guest counts and double bookings are
/// accepted as given.
pub struct ReservationManager {
    repo: Arc<dyn ReservationRepository>,
}

impl ReservationManager {
    pub fn new(repo: Arc<dyn ReservationRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ReservationService for ReservationManager {
    async fn save(&self, reservation: Reservation) -> AppResult<Reservation> {
        self.repo
            .insert(reservation)
            .await
            .context("could not save reservation")
    }

    async fn list(&self) -> AppResult<Vec<Reservation>> {
        self.repo
            .find_all()
            .await
            .context("could not list all reservations")
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Reservation> {
        self.repo.find_by_id(id).await
    }

    async fn find_by_employee_id(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        self.repo.find_by_employee_id(user_id).await
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        self.repo.find_by_date(date).await
    }

    async fn update(&self, reservation: Reservation) -> AppResult<Upsert<Reservation>> {
        let fallback = reservation.clone();

        match self
            .repo
            .update(reservation)
            .await
            .context("could not update reservation")?
        {
            UpdateOutcome::Updated(reservation) => Ok(Upsert::Updated(reservation)),
            UpdateOutcome::NotFound => {
                let created = self
                    .repo
                    .insert(fallback)
                    .await
                    .context("could not create reservation")?;
                Ok(Upsert::Created(created))
            }
        }
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.repo
            .delete_by_id(id)
            .await
            .context_unless_not_found("could not remove reservation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryReservationStore, MockReservationRepository};
    use chrono::{TimeZone, Utc};
    use common::AppError;
    use domain::ReservationType;
    use std::error::Error as _;

    fn lunch_for(user_id: i64) -> Reservation {
        let time = Utc.with_ymd_and_hms(2024, 6, 3, 12, 30, 0).unwrap();
        let mut reservation = Reservation::new(user_id, time, ReservationType::Lunch, 2);
        reservation.name = "Asha".to_string();
        reservation
    }

    fn memory_manager() -> ReservationManager {
        ReservationManager::new(Arc::new(MemoryReservationStore::new()))
    }

    #[tokio::test]
    async fn saved_reservation_round_trips() {
        let service = memory_manager();
        let before = Utc::now();

        let saved = service.save(lunch_for(7)).await.unwrap();
        assert!(saved.created_at >= before);
        assert!(saved.created_at <= Utc::now());
        assert_eq!(saved.reservation_type.ordinal(), 2);

        let found = service.find_by_id(saved.id).await.unwrap();

        let expected = lunch_for(7);
        assert_ne!(found.id, 0);
        assert_eq!(found.user_id, expected.user_id);
        assert_eq!(found.name, expected.name);
        assert_eq!(found.reservation_time, expected.reservation_time);
        assert_eq!(found.reservation_type, ReservationType::Lunch);
        assert_eq!(found.reservation_type.as_str(), "lunch");
        assert_eq!(found.no_of_guests, 2);
        assert_eq!(found.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_new_reservation() {
        let service = memory_manager();
        let mut reservation = lunch_for(7);
        reservation.id = 999;

        let upsert = service.update(reservation).await.unwrap();

        assert!(upsert.was_created());
        let created = upsert.into_inner();
        assert_ne!(created.id, 999);
        assert_eq!(service.find_by_id(created.id).await.unwrap().user_id, 7);
        assert!(service.find_by_id(999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_of_known_id_keeps_it() {
        let service = memory_manager();
        let saved = service.save(lunch_for(7)).await.unwrap();

        let mut changed = saved.clone();
        changed.reservation_type = ReservationType::Dinner;
        let (updated, created) = service.update(changed).await.unwrap().into_parts();

        assert!(!created);
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.reservation_type, ReservationType::Dinner);
    }

    #[tokio::test]
    async fn removed_reservation_is_gone() {
        let service = memory_manager();
        let saved = service.save(lunch_for(7)).await.unwrap();

        service.remove(saved.id).await.unwrap();

        assert!(service.find_by_id(saved.id).await.unwrap_err().is_not_found());
        let err = service.remove(saved.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref e) if e == "reservation"));
    }

    #[tokio::test]
    async fn save_failure_is_wrapped_with_cause() {
        let mut repo = MockReservationRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::internal("connection reset")));
        let service = ReservationManager::new(Arc::new(repo));

        let err = service.save(lunch_for(1)).await.unwrap_err();

        assert!(err.to_string().starts_with("could not save reservation: "));
        let cause = err.source().expect("cause is preserved");
        assert_eq!(cause.to_string(), "Internal server error: connection reset");
    }

    #[tokio::test]
    async fn list_failure_is_wrapped() {
        let mut repo = MockReservationRepository::new();
        repo.expect_find_all()
            .returning(|| Err(AppError::internal("timeout")));
        let service = ReservationManager::new(Arc::new(repo));

        let err = service.list().await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Repository { context: "could not list all reservations", .. }
        ));
    }

    #[tokio::test]
    async fn find_errors_pass_through() {
        let mut repo = MockReservationRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(AppError::not_found("reservation")));
        repo.expect_find_by_employee_id()
            .returning(|_| Err(AppError::internal("boom")));
        let service = ReservationManager::new(Arc::new(repo));

        assert!(service.find_by_id(1).await.unwrap_err().is_not_found());
        assert!(matches!(
            service.find_by_employee_id(1).await.unwrap_err(),
            AppError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn failed_update_does_not_insert() {
        let mut repo = MockReservationRepository::new();
        repo.expect_update()
            .returning(|_| Err(AppError::internal("lock timeout")));
        repo.expect_insert().never();
        let service = ReservationManager::new(Arc::new(repo));

        let err = service.update(lunch_for(1)).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Repository { context: "could not update reservation", .. }
        ));
    }

    #[tokio::test]
    async fn failed_fallback_insert_is_wrapped() {
        let mut repo = MockReservationRepository::new();
        repo.expect_update().returning(|_| Ok(UpdateOutcome::NotFound));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("disk full")));
        let service = ReservationManager::new(Arc::new(repo));

        let err = service.update(lunch_for(1)).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Repository { context: "could not create reservation", .. }
        ));
    }

    #[tokio::test]
    async fn remove_wraps_failures_other_than_not_found() {
        let mut repo = MockReservationRepository::new();
        repo.expect_delete_by_id()
            .returning(|_| Err(AppError::internal("fk violation")));
        let service = ReservationManager::new(Arc::new(repo));

        let err = service.remove(3).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Repository { context: "could not remove reservation", .. }
        ));
    }
}
