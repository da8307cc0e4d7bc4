//! ListUsersHandler - Query handler for the admin roster view.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role};
use crate::domain::users::{User, UserError};
use crate::ports::UserRepository;

/// Query to list every user. Admin only.
#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub requester_role: Role,
}

/// Handler for the roster listing.
pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<User>, UserError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(query.requester_role) {
            return Err(UserError::NotAuthorized);
        }

        let users = self.users.list().await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn admin_lists_users() {
        let repo = InMemoryUserRepository::with_users(vec![
            User::register("a", "a@example.com").unwrap(),
            User::register("b", "b@example.com").unwrap(),
        ]);
        let handler = ListUsersHandler::new(Arc::new(repo));

        let users = handler
            .handle(ListUsersQuery {
                requester_role: Role::Admin,
            })
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn non_admin_is_denied() {
        let handler = ListUsersHandler::new(Arc::new(InMemoryUserRepository::new()));

        let result = handler
            .handle(ListUsersQuery {
                requester_role: Role::User,
            })
            .await;

        assert_eq!(result, Err(UserError::NotAuthorized));
    }
}
