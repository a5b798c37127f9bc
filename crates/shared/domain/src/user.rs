//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff member known to the mess.
///
/// `id` is the storage identity assigned on insert; `employee_id` is the
/// business key staff log in with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub designation: String,
    pub employee_id: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create an unsaved active, non-admin user. The password is left empty
    /// and gets assigned on save.
    pub fn new(
        name: impl Into<String>,
        designation: impl Into<String>,
        employee_id: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            password: String::new(),
            designation: designation.into(),
            employee_id: employee_id.into(),
            is_active: true,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    /// Check whether the supplied credential matches the stored one.
    ///
    /// Credentials are stored as given; comparison is exact.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Storage identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Job title
    pub designation: String,
    /// Business key used for login
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Account creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            designation: user.designation,
            employee_id: user.employee_id,
            is_active: user.is_active,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let mut user = User::new("Asha", "Engineer", "E-100");
        user.password = "hunter2".to_string();

        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("hunter2"));
        assert!(json.contains("E-100"));
    }

    #[test]
    fn password_comparison_is_exact() {
        let mut user = User::new("Asha", "Engineer", "E-100");
        user.password = "Secret".to_string();

        assert!(user.password_matches("Secret"));
        assert!(!user.password_matches("secret"));
        assert!(!user.password_matches("Secret "));
    }
}
