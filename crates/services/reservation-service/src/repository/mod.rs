//! Repository layer for reservation data access.

pub mod entities;
mod memory;
mod reservation_repository;

pub use memory::MemoryReservationStore;
pub use reservation_repository::{ReservationRepository, ReservationStore};

#[cfg(any(test, feature = "test-utils"))]
pub use reservation_repository::MockReservationRepository;
