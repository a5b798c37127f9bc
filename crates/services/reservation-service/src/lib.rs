//! Reservation Service Library
//!
//! Meal reservation management: the reservation repository contract with SQL
//! and in-memory stores, the reservation service and its logging decorator.

pub mod repository;
pub mod service;

pub use repository::{MemoryReservationStore, ReservationRepository, ReservationStore};
pub use service::{LoggingReservationService, ReservationManager, ReservationService};
