//! Tagged results for update-or-insert flows.

/// What a repository update found.
///
/// Storage failures travel separately as the `Err` side of the surrounding
/// result, so callers match three explicit branches instead of comparing
/// sentinel errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome<T> {
    /// The target existed and now holds the new values
    Updated(T),
    /// No record with the target id exists
    NotFound,
}

/// Which path a service-level upsert took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert<T> {
    /// An existing record was updated in place
    Updated(T),
    /// No record existed, so the input was inserted as a new one
    Created(T),
}

impl<T> Upsert<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Upsert::Created(_))
    }

    pub fn record(&self) -> &T {
        match self {
            Upsert::Updated(record) | Upsert::Created(record) => record,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Upsert::Updated(record) | Upsert::Created(record) => record,
        }
    }

    /// Split into the record and the `was_created` flag.
    pub fn into_parts(self) -> (T, bool) {
        let created = self.was_created();
        (self.into_inner(), created)
    }
}
