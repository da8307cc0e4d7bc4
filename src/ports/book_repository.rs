//! Book repository port.

use async_trait::async_trait;

use crate::domain::access::Tier;
use crate::domain::catalog::Book;
use crate::domain::foundation::{BookId, DomainError};

/// Repository port for catalog persistence.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Save a new book.
    async fn save(&self, book: &Book) -> Result<(), DomainError>;

    /// Update an existing book. Last writer wins.
    async fn update(&self, book: &Book) -> Result<(), DomainError>;

    /// Find a book by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, DomainError>;

    /// List books whose access level is one of `levels`, newest first.
    ///
    /// The caller supplies the levels visible at the requester's tier;
    /// the store never sees the requester.
    async fn list_by_levels(&self, levels: &[Tier]) -> Result<Vec<Book>, DomainError>;

    /// Delete a book by id.
    async fn delete(&self, id: &BookId) -> Result<(), DomainError>;
}
