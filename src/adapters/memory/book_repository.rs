//! In-memory implementation of BookRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::access::Tier;
use crate::domain::catalog::Book;
use crate::domain::foundation::{BookId, DomainError};
use crate::ports::BookRepository;

/// In-memory catalog store.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given books.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
        }
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn save(&self, book: &Book) -> Result<(), DomainError> {
        self.books.lock().unwrap().push(book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<(), DomainError> {
        let mut books = self.books.lock().unwrap();
        if let Some(stored) = books.iter_mut().find(|b| b.id == book.id) {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, DomainError> {
        Ok(self.books.lock().unwrap().iter().find(|b| &b.id == id).cloned())
    }

    async fn list_by_levels(&self, levels: &[Tier]) -> Result<Vec<Book>, DomainError> {
        let mut matched: Vec<Book> = self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| levels.contains(&b.access_level))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn delete(&self, id: &BookId) -> Result<(), DomainError> {
        self.books.lock().unwrap().retain(|b| &b.id != id);
        Ok(())
    }
}
