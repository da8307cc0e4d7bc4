//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::access::Tier;
use crate::domain::catalog::{Book, BookUpdate};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a book.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub description: String,
    pub access_level: Tier,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Request to update a book. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub access_level: Option<Tier>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(request: UpdateBookRequest) -> Self {
        BookUpdate {
            title: request.title,
            author: request.author,
            description: request.description,
            access_level: request.access_level,
            cover_image: request.cover_image,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A book as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image: String,
    pub access_level: Tier,
    /// Creation time (ISO 8601).
    pub created_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title,
            author: book.author,
            description: book.description,
            cover_image: book.cover_image,
            access_level: book.access_level,
            created_at: book.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_defaults_to_all_absent() {
        let request: UpdateBookRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.access_level.is_none());
    }

    #[test]
    fn book_response_serializes_access_level_lowercase() {
        let book = Book::new("T", "A", "D", Tier::Premium, None).unwrap();
        let json = serde_json::to_value(BookResponse::from(book)).unwrap();
        assert_eq!(json["access_level"], "premium");
    }
}
