//! In-memory implementation of UserRepository.
//!
//! Backs unit and integration tests; mirrors the uniqueness behavior of
//! the PostgreSQL implementation.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::access::Tier;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::users::User;
use crate::ports::UserRepository;

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given users.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    /// Returns a snapshot of all stored users.
    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(DomainError::validation(
                "username",
                "Username or email already taken",
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(stored) = users.iter_mut().find(|u| u.id == user.id) {
            *stored = user.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().iter().find(|u| &u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count_by_tier(&self, tier: Tier) -> Result<u64, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.tier == tier)
            .count() as u64)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users.lock().unwrap().retain(|u| &u.id != id);
        Ok(())
    }
}
