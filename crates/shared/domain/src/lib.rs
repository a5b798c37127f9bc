//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the services and the gateway.

pub mod constants;
pub mod error;
pub mod reservation;
pub mod upsert;
pub mod user;

pub use constants::*;
pub use error::DomainError;
pub use reservation::{Reservation, ReservationResponse, ReservationType};
pub use upsert::{UpdateOutcome, Upsert};
pub use user::{User, UserResponse};
