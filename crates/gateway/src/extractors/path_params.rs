//! Path segment parsing with client-facing error messages.

use chrono::NaiveDate;

use common::{AppError, AppResult};
use domain::RESERVATION_DATE_FORMAT;

/// Parse a numeric id path segment for `entity`.
pub fn parse_id(raw: &str, entity: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("{} id in path must be numeric", entity)))
}

/// Parse a `YYYY-MM-DD` path segment.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, RESERVATION_DATE_FORMAT).map_err(|_| {
        AppError::bad_request(format!("date in path must be YYYY-MM-DD, got {:?}", raw))
    })
}
