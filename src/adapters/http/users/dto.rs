//! HTTP DTOs for user roster endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::access::{Role, Tier};
use crate::domain::users::User;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to update a user. Absent fields stay unchanged; the role
/// field is honored only for admin requesters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A user as returned by the API. The credential never appears here;
/// it lives with the identity provider.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub subscription: Tier,
    /// Creation time (ISO 8601).
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            role: user.role,
            subscription: user.tier,
            created_at: user.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_defaults_to_all_absent() {
        let request: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_none());
        assert!(request.role.is_none());
    }

    #[test]
    fn user_response_exposes_no_credential() {
        let user = User::register("reader", "reader@example.com").unwrap();
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["subscription"], "free");
    }
}
