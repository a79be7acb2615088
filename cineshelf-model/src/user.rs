//! User identity and the transient role claim asserted at login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account known to the catalog.
///
/// Identity is managed externally; `is_admin` is the sole authorization
/// signal for the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Role selected on the login form.
///
/// Not persisted anywhere: the claim is checked once against `is_admin`
/// during login and then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleClaim {
    User,
    Admin,
}

impl RoleClaim {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleClaim::User => "user",
            RoleClaim::Admin => "admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_claim_round_trips_lowercase() {
        let claim: RoleClaim = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(claim, RoleClaim::Admin);
        assert_eq!(serde_json::to_string(&RoleClaim::User).unwrap(), "\"user\"");
    }

    #[test]
    fn user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::now_v7(),
            email: "viewer@example.com".into(),
            display_name: "Viewer".into(),
            password_hash: "$argon2id$secret".into(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("viewer@example.com"));
    }
}
