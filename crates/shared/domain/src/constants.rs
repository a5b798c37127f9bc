//! Domain-level constants.
//!
//! These constants define business rules and defaults shared by the services.

// =============================================================================
// Users
// =============================================================================

/// Credential assigned to every newly saved user until it is changed out-of-band
pub const DEFAULT_USER_PASSWORD: &str = "password@1234";

// =============================================================================
// Reservations
// =============================================================================

/// Ordinal of the first meal slot
pub const FIRST_RESERVATION_TYPE: i32 = 1;

/// Ordinal of the last meal slot
pub const LAST_RESERVATION_TYPE: i32 = 3;

/// Path date format accepted for day queries
pub const RESERVATION_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Authentication
// =============================================================================

/// Default session token lifetime in minutes
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

/// Longest accepted session token lifetime in minutes (one year)
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Signing key used by debug builds when no secret is configured
pub const DEV_SIGNING_KEY: &str = "dev-secret-key-minimum-32-chars!!";
