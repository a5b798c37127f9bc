//! Reservation domain entity and the meal slot enumeration.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Meal slot being reserved.
///
/// The ordinal is persisted and serialized as a plain integer, so the
/// discriminants must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ReservationType {
    Breakfast = 1,
    Lunch = 2,
    Dinner = 3,
}

impl ReservationType {
    /// Lowercase name of the slot
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationType::Breakfast => "breakfast",
            ReservationType::Lunch => "lunch",
            ReservationType::Dinner => "dinner",
        }
    }

    /// Integer ordinal as stored
    pub fn ordinal(&self) -> i32 {
        *self as i32
    }

    /// Name of a raw ordinal, `None` outside the valid range
    pub fn name_of(ordinal: i32) -> Option<&'static str> {
        ReservationType::try_from(ordinal).ok().map(|t| t.as_str())
    }
}

impl TryFrom<i32> for ReservationType {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReservationType::Breakfast),
            2 => Ok(ReservationType::Lunch),
            3 => Ok(ReservationType::Dinner),
            other => Err(DomainError::UnknownReservationType(other)),
        }
    }
}

impl From<ReservationType> for i32 {
    fn from(value: ReservationType) -> Self {
        value.ordinal()
    }
}

impl fmt::Display for ReservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meal reservation made by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    /// Display name of the owning user
    pub name: String,
    pub reservation_time: DateTime<Utc>,
    pub reservation_type: ReservationType,
    pub no_of_guests: i64,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Create an unsaved reservation; id and creation time are assigned on insert.
    pub fn new(
        user_id: i64,
        reservation_time: DateTime<Utc>,
        reservation_type: ReservationType,
        no_of_guests: i64,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            name: String::new(),
            reservation_time,
            reservation_type,
            no_of_guests,
            created_at: Utc::now(),
        }
    }
}

/// Reservation response returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub reservation_time: DateTime<Utc>,
    /// Meal slot: 1 = breakfast, 2 = lunch, 3 = dinner
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(value_type = i32, example = 2))]
    pub reservation_type: ReservationType,
    pub no_of_guests: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            name: reservation.name,
            reservation_time: reservation.reservation_time,
            reservation_type: reservation.reservation_type,
            no_of_guests: reservation.no_of_guests,
            created_at: reservation.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_meal_order() {
        assert_eq!(ReservationType::Breakfast.ordinal(), 1);
        assert_eq!(ReservationType::Lunch.ordinal(), 2);
        assert_eq!(ReservationType::Dinner.ordinal(), 3);
    }

    #[test]
    fn out_of_range_ordinals_have_no_name() {
        assert_eq!(ReservationType::name_of(0), None);
        assert_eq!(ReservationType::name_of(4), None);
        assert_eq!(ReservationType::name_of(-1), None);
        assert_eq!(ReservationType::name_of(2), Some("lunch"));
    }

    #[test]
    fn try_from_rejects_unknown_ordinal() {
        let err = ReservationType::try_from(7).unwrap_err();
        assert_eq!(err, DomainError::UnknownReservationType(7));
        assert_eq!(err.to_string(), "reservation type must be between 1 and 3, got 7");
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&ReservationType::Dinner).unwrap();
        assert_eq!(json, "3");

        let parsed: ReservationType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, ReservationType::Breakfast);

        assert!(serde_json::from_str::<ReservationType>("9").is_err());
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn response_schema_documents_meal_as_integer() {
        use utoipa::ToSchema;

        let (name, schema) = ReservationResponse::schema();
        let schema = serde_json::to_value(schema).unwrap();

        assert_eq!(name, "ReservationResponse");
        assert_eq!(schema["properties"]["type"]["type"], "integer");
        assert_eq!(schema["properties"]["type"]["example"], 2);
    }
}
