//! DeleteUserHandler - Command handler for removing a user. Admin only.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role};
use crate::domain::foundation::UserId;
use crate::domain::users::UserError;
use crate::ports::UserRepository;

/// Command to delete a user.
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub requester_role: Role,
    pub target_user_id: UserId,
}

/// Handler for user deletion.
///
/// Payment records referencing the user stay in place; nothing cascades.
pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), UserError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(UserError::NotAuthorized);
        }

        if self.users.find_by_id(&cmd.target_user_id).await?.is_none() {
            return Err(UserError::NotFound(cmd.target_user_id));
        }

        self.users.delete(&cmd.target_user_id).await?;

        tracing::info!(user = %cmd.target_user_id, "user deleted");
        Ok(())
    }
}
