//! UpdateUserHandler - Command handler for profile and role updates.

use std::sync::Arc;

use crate::domain::access::{can_act_on_user, can_change_role, AccessDecision, Role};
use crate::domain::foundation::UserId;
use crate::domain::users::{User, UserError, UserUpdate};
use crate::ports::UserRepository;

/// Command to update a user record. Self or admin; the role field is
/// admin-only even on a self-update.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub requester_id: UserId,
    pub requester_role: Role,
    pub target_user_id: UserId,
    pub update: UserUpdate,
    pub role: Option<Role>,
}

/// Handler for user updates. Read-then-write, last writer wins.
pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<User, UserError> {
        if let AccessDecision::Deny(_) =
            can_act_on_user(&cmd.requester_id, cmd.requester_role, &cmd.target_user_id)
        {
            return Err(UserError::NotAuthorized);
        }

        // Role mutation is checked before anything is loaded or written.
        if cmd.role.is_some() {
            if let AccessDecision::Deny(_) = can_change_role(cmd.requester_role) {
                return Err(UserError::RoleChangeForbidden);
            }
        }

        let mut user = self
            .users
            .find_by_id(&cmd.target_user_id)
            .await?
            .ok_or(UserError::NotFound(cmd.target_user_id))?;

        user.apply(cmd.update)
            .map_err(|e| UserError::validation("user", e.to_string()))?;

        if let Some(role) = cmd.role {
            user.change_role(role);
        }

        self.users.update(&user).await?;
        Ok(user)
    }
}
