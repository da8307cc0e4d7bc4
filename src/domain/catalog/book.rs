//! Book entity - a catalog item gated by subscription tier.

use serde::{Deserialize, Serialize};

use crate::domain::access::Tier;
use crate::domain::foundation::{BookId, Timestamp, ValidationError};

/// Cover reference used when none is supplied at creation.
pub const DEFAULT_COVER: &str = "default-cover.jpg";

/// A book in the catalog.
///
/// Created and mutated only by admins; readable by any authenticated user
/// whose tier ranks at or above `access_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image: String,
    pub access_level: Tier,
    pub created_at: Timestamp,
}

impl Book {
    /// Creates a new book with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` when title, author, or
    /// description is blank.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
        access_level: Tier,
        cover_image: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let author = author.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if author.trim().is_empty() {
            return Err(ValidationError::empty_field("author"));
        }
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }

        Ok(Self {
            id: BookId::new(),
            title,
            author,
            description,
            cover_image: cover_image.unwrap_or_else(|| DEFAULT_COVER.to_string()),
            access_level,
            created_at: Timestamp::now(),
        })
    }

    /// Applies a partial update, touching only the supplied fields.
    pub fn apply(&mut self, update: BookUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(access_level) = update.access_level {
            self.access_level = access_level;
        }
        if let Some(cover_image) = update.cover_image {
            self.cover_image = cover_image;
        }
    }
}

/// Partial update to a book; `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub access_level: Option<Tier>,
    pub cover_image: Option<String>,
}
