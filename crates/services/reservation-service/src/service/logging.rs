//! Logging decorator for [`ReservationService`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info_span;

use common::{observe, AppResult};
use domain::{Reservation, Upsert};

use super::ReservationService;

/// Logs every [`ReservationService`] call with its arguments, duration and
/// error, and hands results back unchanged.
pub struct LoggingReservationService {
    inner: Arc<dyn ReservationService>,
}

impl LoggingReservationService {
    pub fn new(inner: Arc<dyn ReservationService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ReservationService for LoggingReservationService {
    async fn save(&self, reservation: Reservation) -> AppResult<Reservation> {
        let span = info_span!(
            "reservation_service",
            user_id = reservation.user_id,
            meal = %reservation.reservation_type,
        );
        observe(span, "save", self.inner.save(reservation)).await
    }

    async fn list(&self) -> AppResult<Vec<Reservation>> {
        observe(info_span!("reservation_service"), "list", self.inner.list()).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Reservation> {
        let span = info_span!("reservation_service", id);
        observe(span, "find_by_id", self.inner.find_by_id(id)).await
    }

    async fn find_by_employee_id(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        let span = info_span!("reservation_service", user_id);
        observe(
            span,
            "find_by_employee_id",
            self.inner.find_by_employee_id(user_id),
        )
        .await
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        let span = info_span!("reservation_service", %date);
        observe(span, "find_by_date", self.inner.find_by_date(date)).await
    }

    async fn update(&self, reservation: Reservation) -> AppResult<Upsert<Reservation>> {
        let span = info_span!(
            "reservation_service",
            id = reservation.id,
            user_id = reservation.user_id,
        );
        observe(span, "update", self.inner.update(reservation)).await
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        let span = info_span!("reservation_service", id);
        observe(span, "remove", self.inner.remove(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockReservationService;
    use chrono::{TimeZone, Utc};
    use common::AppError;
    use domain::ReservationType;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn success_is_returned_untouched() {
        let time = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
        let stored = Reservation::new(4, time, ReservationType::Breakfast, 1);
        let expected = stored.clone();
        let mut inner = MockReservationService::new();
        inner
            .expect_find_by_id()
            .with(eq(4))
            .times(1)
            .returning(move |_| Ok(stored.clone()));
        let service = LoggingReservationService::new(Arc::new(inner));

        assert_eq!(service.find_by_id(4).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn failure_is_returned_untouched() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let mut inner = MockReservationService::new();
        inner
            .expect_find_by_date()
            .with(eq(date))
            .times(1)
            .returning(|_| {
                Err(AppError::repository(
                    "could not list all reservations",
                    AppError::internal("x"),
                ))
            });
        let service = LoggingReservationService::new(Arc::new(inner));

        let err = service.find_by_date(date).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Repository { context: "could not list all reservations", .. }
        ));
    }
}
