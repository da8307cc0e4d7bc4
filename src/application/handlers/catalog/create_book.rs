//! CreateBookHandler - Command handler for adding a book to the catalog.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role, Tier};
use crate::domain::catalog::{Book, CatalogError};
use crate::ports::BookRepository;

/// Command to create a book. Admin only.
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub requester_role: Role,
    pub title: String,
    pub author: String,
    pub description: String,
    pub access_level: Tier,
    pub cover_image: Option<String>,
}

/// Handler for book creation.
pub struct CreateBookHandler {
    books: Arc<dyn BookRepository>,
}

impl CreateBookHandler {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn handle(&self, cmd: CreateBookCommand) -> Result<Book, CatalogError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(CatalogError::NotAuthorized);
        }

        let book = Book::new(
            cmd.title,
            cmd.author,
            cmd.description,
            cmd.access_level,
            cmd.cover_image,
        )
        .map_err(|e| CatalogError::validation("book", e.to_string()))?;

        self.books.save(&book).await?;

        tracing::info!(book = %book.id, level = %book.access_level, "book created");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookRepository;

    fn command(role: Role) -> CreateBookCommand {
        CreateBookCommand {
            requester_role: role,
            title: "New Book".to_string(),
            author: "Author".to_string(),
            description: "Description".to_string(),
            access_level: Tier::Basic,
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn admin_creates_book() {
        let handler = CreateBookHandler::new(Arc::new(InMemoryBookRepository::new()));

        let book = handler.handle(command(Role::Admin)).await.unwrap();
        assert_eq!(book.access_level, Tier::Basic);
    }

    #[tokio::test]
    async fn non_admin_is_denied() {
        let handler = CreateBookHandler::new(Arc::new(InMemoryBookRepository::new()));

        let result = handler.handle(command(Role::User)).await;
        assert_eq!(result, Err(CatalogError::NotAuthorized));
    }

    #[tokio::test]
    async fn blank_title_fails_validation() {
        let handler = CreateBookHandler::new(Arc::new(InMemoryBookRepository::new()));

        let result = handler
            .handle(CreateBookCommand {
                title: "  ".to_string(),
                ..command(Role::Admin)
            })
            .await;

        assert!(matches!(result, Err(CatalogError::ValidationFailed { .. })));
    }
}
