//! Domain-level errors.

use thiserror::Error;

use crate::constants::{FIRST_RESERVATION_TYPE, LAST_RESERVATION_TYPE};

/// Input that no domain value can be built from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Meal slot ordinal outside the known range
    #[error(
        "reservation type must be between {} and {}, got {0}",
        FIRST_RESERVATION_TYPE,
        LAST_RESERVATION_TYPE
    )]
    UnknownReservationType(i32),
}
