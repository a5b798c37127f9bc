//! In-memory reservation repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use super::reservation_repository::{day_bounds, ReservationRepository, RESERVATION};
use common::{AppError, AppResult, OptionExt};
use domain::{Reservation, UpdateOutcome};

/// Reservation repository kept in process memory.
///
/// There is no users table to join, so `name` is stored as supplied.
#[derive(Default)]
pub struct MemoryReservationStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    reservations: BTreeMap<i64, Reservation>,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.reservations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn select<P>(&self, predicate: P) -> Vec<Reservation>
    where
        P: Fn(&Reservation) -> bool,
    {
        let state = self.state.read().await;
        let mut found: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.reservation_time, r.id));
        found
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationStore {
    async fn insert(&self, mut reservation: Reservation) -> AppResult<Reservation> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        reservation.id = state.last_id;
        reservation.created_at = Utc::now();
        state.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.state.read().await.reservations.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Reservation> {
        self.state
            .read()
            .await
            .reservations
            .get(&id)
            .cloned()
            .ok_or_not_found(RESERVATION)
    }

    async fn find_by_employee_id(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        Ok(self.select(|r| r.user_id == user_id).await)
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        let (start, end) = day_bounds(date)?;
        Ok(self
            .select(|r| r.reservation_time >= start && r.reservation_time < end)
            .await)
    }

    async fn update(&self, mut reservation: Reservation) -> AppResult<UpdateOutcome<Reservation>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.reservations.get_mut(&reservation.id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        reservation.created_at = existing.created_at;
        *existing = reservation.clone();
        Ok(UpdateOutcome::Updated(reservation))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        match self.state.write().await.reservations.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(RESERVATION)),
        }
    }
}
