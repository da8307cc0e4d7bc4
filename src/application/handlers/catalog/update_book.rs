//! UpdateBookHandler - Command handler for editing a catalog entry.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role};
use crate::domain::catalog::{Book, BookUpdate, CatalogError};
use crate::domain::foundation::BookId;
use crate::ports::BookRepository;

/// Command to update a book. Admin only; absent fields stay unchanged.
#[derive(Debug, Clone)]
pub struct UpdateBookCommand {
    pub requester_role: Role,
    pub book_id: BookId,
    pub update: BookUpdate,
}

/// Handler for book updates. Read-then-write, last writer wins.
pub struct UpdateBookHandler {
    books: Arc<dyn BookRepository>,
}

impl UpdateBookHandler {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn handle(&self, cmd: UpdateBookCommand) -> Result<Book, CatalogError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(CatalogError::NotAuthorized);
        }

        let mut book = self
            .books
            .find_by_id(&cmd.book_id)
            .await?
            .ok_or(CatalogError::BookNotFound(cmd.book_id))?;

        book.apply(cmd.update);
        self.books.update(&book).await?;

        Ok(book)
    }
}
