mod logging;
mod reservation_service;

pub use logging::LoggingReservationService;
pub use reservation_service::{ReservationManager, ReservationService};

#[cfg(any(test, feature = "test-utils"))]
pub use reservation_service::MockReservationService;
