//! User entity - an account on the library.

use serde::{Deserialize, Serialize};

use crate::domain::access::{Role, Tier};
use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// A registered library user.
///
/// Credentials live with the external identity provider; this record
/// carries only what gating and administration need. `tier` is a
/// denormalized copy of the backing plan's name; because [`Tier`] is the
/// same closed enum plans are keyed by, it can never name a tier outside
/// the fixed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub tier: Tier,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a new user at the registration defaults (role user, tier free).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when username or email is blank.
    pub fn register(
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        let email = email.into();

        if username.trim().is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        Ok(Self {
            id: UserId::new(),
            username,
            email,
            role: Role::User,
            tier: Tier::Free,
            created_at: Timestamp::now(),
        })
    }

    /// Applies a profile update, touching only the supplied fields.
    ///
    /// Role changes go through [`User::change_role`]; tier changes through
    /// [`User::change_tier`]. Both require their own authorization checks.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` for a present-but-blank
    /// username or email.
    pub fn apply(&mut self, update: UserUpdate) -> Result<(), ValidationError> {
        if let Some(username) = update.username {
            if username.trim().is_empty() {
                return Err(ValidationError::empty_field("username"));
            }
            self.username = username;
        }
        if let Some(email) = update.email {
            if email.trim().is_empty() {
                return Err(ValidationError::empty_field("email"));
            }
            self.email = email;
        }
        Ok(())
    }

    /// Sets the role. Callers must have passed the admin-only check first.
    pub fn change_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Sets the subscription tier.
    pub fn change_tier(&mut self, tier: Tier) {
        self.tier = tier;
    }
}

/// Partial profile update; `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_defaults_to_free_user() {
        let user = User::register("reader", "reader@example.com").unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.tier, Tier::Free);
    }

    #[test]
    fn blank_username_rejected_at_registration() {
        assert!(User::register("   ", "a@b.c").is_err());
    }

    #[test]
    fn apply_rejects_present_but_blank_username() {
        let mut user = User::register("reader", "reader@example.com").unwrap();
        let result = user.apply(UserUpdate {
            username: Some("  ".to_string()),
            email: None,
        });
        assert!(result.is_err());
        assert_eq!(user.username, "reader");
    }

    #[test]
    fn apply_updates_only_supplied_fields() {
        let mut user = User::register("reader", "reader@example.com").unwrap();
        user.apply(UserUpdate {
            username: None,
            email: Some("new@example.com".to_string()),
        })
        .unwrap();
        assert_eq!(user.username, "reader");
        assert_eq!(user.email, "new@example.com");
    }

    #[test]
    fn change_tier_takes_effect_immediately() {
        let mut user = User::register("reader", "reader@example.com").unwrap();
        user.change_tier(Tier::Premium);
        assert_eq!(user.tier, Tier::Premium);
    }
}
