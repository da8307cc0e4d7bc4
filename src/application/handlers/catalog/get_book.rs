//! GetBookHandler - Query handler for a single gated book read.

use std::sync::Arc;

use crate::domain::access::{can_read_book, AccessDecision};
use crate::domain::catalog::{Book, CatalogError};
use crate::domain::foundation::{BookId, UserId};
use crate::ports::{BookRepository, UserRepository};

/// Query to read one book.
#[derive(Debug, Clone)]
pub struct GetBookQuery {
    pub requester_id: UserId,
    pub book_id: BookId,
}

/// Handler for a single book read.
///
/// A missing book and a tier denial are distinct outcomes: the first is
/// `BookNotFound`, the second `UpgradeRequired` with no book fields
/// attached.
pub struct GetBookHandler {
    users: Arc<dyn UserRepository>,
    books: Arc<dyn BookRepository>,
}

impl GetBookHandler {
    pub fn new(users: Arc<dyn UserRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { users, books }
    }

    pub async fn handle(&self, query: GetBookQuery) -> Result<Book, CatalogError> {
        let book = self
            .books
            .find_by_id(&query.book_id)
            .await?
            .ok_or(CatalogError::BookNotFound(query.book_id))?;

        let user = self
            .users
            .find_by_id(&query.requester_id)
            .await?
            .ok_or(CatalogError::NotAuthorized)?;

        match can_read_book(user.tier, book.access_level) {
            AccessDecision::Allow => Ok(book),
            AccessDecision::Deny(_) => {
                tracing::debug!(
                    user = %user.id,
                    tier = %user.tier,
                    required = %book.access_level,
                    "book read denied"
                );
                Err(CatalogError::upgrade_required(book.access_level, user.tier))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryBookRepository, InMemoryUserRepository};
    use crate::domain::access::Tier;
    use crate::domain::users::User;

    fn setup(tier: Tier, level: Tier) -> (GetBookHandler, UserId, BookId) {
        let mut user = User::register("reader", "reader@example.com").unwrap();
        user.change_tier(tier);
        let user_id = user.id;

        let book = Book::new("Gated", "Author", "Description", level, None).unwrap();
        let book_id = book.id;

        let handler = GetBookHandler::new(
            Arc::new(InMemoryUserRepository::with_users(vec![user])),
            Arc::new(InMemoryBookRepository::with_books(vec![book])),
        );
        (handler, user_id, book_id)
    }

    #[tokio::test]
    async fn sufficient_tier_reads_book() {
        let (handler, user_id, book_id) = setup(Tier::Premium, Tier::Basic);

        let book = handler
            .handle(GetBookQuery {
                requester_id: user_id,
                book_id,
            })
            .await
            .unwrap();

        assert_eq!(book.title, "Gated");
    }

    #[tokio::test]
    async fn free_reader_denied_premium_book() {
        let (handler, user_id, book_id) = setup(Tier::Free, Tier::Premium);

        let result = handler
            .handle(GetBookQuery {
                requester_id: user_id,
                book_id,
            })
            .await;

        assert_eq!(
            result,
            Err(CatalogError::UpgradeRequired {
                required: Tier::Premium,
                current: Tier::Free,
            })
        );
    }

    #[tokio::test]
    async fn missing_book_is_not_found_not_denied() {
        let (handler, user_id, _) = setup(Tier::Free, Tier::Premium);
        let missing = BookId::new();

        let result = handler
            .handle(GetBookQuery {
                requester_id: user_id,
                book_id: missing,
            })
            .await;

        assert_eq!(result, Err(CatalogError::BookNotFound(missing)));
    }

    #[tokio::test]
    async fn tier_change_takes_effect_on_next_read() {
        let mut user = User::register("reader", "reader@example.com").unwrap();
        let user_id = user.id;
        let book = Book::new("Gated", "A", "D", Tier::Premium, None).unwrap();
        let book_id = book.id;

        let users = Arc::new(InMemoryUserRepository::with_users(vec![user.clone()]));
        let handler = GetBookHandler::new(
            users.clone(),
            Arc::new(InMemoryBookRepository::with_books(vec![book])),
        );

        let query = GetBookQuery {
            requester_id: user_id,
            book_id,
        };
        assert!(handler.handle(query.clone()).await.is_err());

        user.change_tier(Tier::Premium);
        users.update(&user).await.unwrap();

        assert!(handler.handle(query).await.is_ok());
    }
}
