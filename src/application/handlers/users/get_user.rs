//! GetUserHandler - Query handler for reading one user record.

use std::sync::Arc;

use crate::domain::access::{can_act_on_user, AccessDecision, Role};
use crate::domain::foundation::UserId;
use crate::domain::users::{User, UserError};
use crate::ports::UserRepository;

/// Query to read a user record. Self or admin.
#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub requester_id: UserId,
    pub requester_role: Role,
    pub target_user_id: UserId,
}

/// Handler for a single user read.
pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, UserError> {
        if let AccessDecision::Deny(_) =
            can_act_on_user(&query.requester_id, query.requester_role, &query.target_user_id)
        {
            return Err(UserError::NotAuthorized);
        }

        self.users
            .find_by_id(&query.target_user_id)
            .await?
            .ok_or(UserError::NotFound(query.target_user_id))
    }
}
