//! DeleteBookHandler - Command handler for removing a catalog entry.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::BookId;
use crate::ports::BookRepository;

/// Command to delete a book. Admin only.
#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    pub requester_role: Role,
    pub book_id: BookId,
}

/// Handler for book deletion.
pub struct DeleteBookHandler {
    books: Arc<dyn BookRepository>,
}

impl DeleteBookHandler {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn handle(&self, cmd: DeleteBookCommand) -> Result<(), CatalogError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(CatalogError::NotAuthorized);
        }

        if self.books.find_by_id(&cmd.book_id).await?.is_none() {
            return Err(CatalogError::BookNotFound(cmd.book_id));
        }

        self.books.delete(&cmd.book_id).await?;

        tracing::info!(book = %cmd.book_id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookRepository;
    use crate::domain::access::Tier;
    use crate::domain::catalog::Book;

    #[tokio::test]
    async fn admin_deletes_existing_book() {
        let book = Book::new("Doomed", "Author", "Description", Tier::Free, None).unwrap();
        let id = book.id;
        let repo = Arc::new(InMemoryBookRepository::with_books(vec![book]));
        let handler = DeleteBookHandler::new(repo.clone());

        handler
            .handle(DeleteBookCommand {
                requester_role: Role::Admin,
                book_id: id,
            })
            .await
            .unwrap();

        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_admin_is_denied() {
        let handler = DeleteBookHandler::new(Arc::new(InMemoryBookRepository::new()));

        let result = handler
            .handle(DeleteBookCommand {
                requester_role: Role::User,
                book_id: BookId::new(),
            })
            .await;

        assert_eq!(result, Err(CatalogError::NotAuthorized));
    }

    #[tokio::test]
    async fn missing_book_is_not_found() {
        let handler = DeleteBookHandler::new(Arc::new(InMemoryBookRepository::new()));
        let missing = BookId::new();

        let result = handler
            .handle(DeleteBookCommand {
                requester_role: Role::Admin,
                book_id: missing,
            })
            .await;

        assert_eq!(result, Err(CatalogError::BookNotFound(missing)));
    }
}
