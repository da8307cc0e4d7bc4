//! User repository port.
//!
//! Contract for persisting and retrieving user records in the external
//! document store. Implementations enforce the username/email uniqueness
//! constraints; the tier-reference count backs the plan-deletion guard.

use async_trait::async_trait;

use crate::domain::access::Tier;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::users::User;

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the username or email is taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user. Last writer wins.
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// List every user, for the admin roster view.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users currently subscribed at `tier`.
    ///
    /// Guards plan deletion: a plan with a non-zero count may not be
    /// removed.
    async fn count_by_tier(&self, tier: Tier) -> Result<u64, DomainError>;

    /// Delete a user by id.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
