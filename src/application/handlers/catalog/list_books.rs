//! ListBooksHandler - Query handler for the tier-filtered catalog listing.

use std::sync::Arc;

use crate::domain::access::visible_levels;
use crate::domain::catalog::{Book, CatalogError};
use crate::domain::foundation::UserId;
use crate::ports::{BookRepository, UserRepository};

/// Query to list the books visible to a requester.
#[derive(Debug, Clone)]
pub struct ListBooksQuery {
    pub requester_id: UserId,
}

/// Handler for the catalog listing.
///
/// Reads the requester's *stored* tier on every call; a tier upgrade is
/// reflected by the very next listing.
pub struct ListBooksHandler {
    users: Arc<dyn UserRepository>,
    books: Arc<dyn BookRepository>,
}

impl ListBooksHandler {
    pub fn new(users: Arc<dyn UserRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { users, books }
    }

    pub async fn handle(&self, query: ListBooksQuery) -> Result<Vec<Book>, CatalogError> {
        let user = self
            .users
            .find_by_id(&query.requester_id)
            .await?
            .ok_or(CatalogError::NotAuthorized)?;

        let levels = visible_levels(user.tier);
        let books = self.books.list_by_levels(&levels).await?;

        Ok(books)
    }
}
