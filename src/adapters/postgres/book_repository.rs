//! PostgreSQL implementation of BookRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::access::Tier;
use crate::domain::catalog::Book;
use crate::domain::foundation::{BookId, DomainError, ErrorCode, Timestamp};
use crate::ports::BookRepository;

use super::parse_tier;

/// PostgreSQL implementation of the BookRepository port.
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a book.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    description: String,
    cover_image: String,
    access_level: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = DomainError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId::from_uuid(row.id),
            title: row.title,
            author: row.author,
            description: row.description,
            cover_image: row.cover_image,
            access_level: parse_tier(&row.access_level)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn save(&self, book: &Book) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, description, cover_image, access_level, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(book.id.as_uuid())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.cover_image)
        .bind(book.access_level.as_str())
        .bind(book.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save book: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = $2,
                author = $3,
                description = $4,
                cover_image = $5,
                access_level = $6
            WHERE id = $1
            "#,
        )
        .bind(book.id.as_uuid())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.cover_image)
        .bind(book.access_level.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update book: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::BookNotFound, "Book not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, DomainError> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, description, cover_image, access_level, created_at
            FROM books WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load book: {}", e))
        })?;

        row.map(Book::try_from).transpose()
    }

    async fn list_by_levels(&self, levels: &[Tier]) -> Result<Vec<Book>, DomainError> {
        let level_names: Vec<&str> = levels.iter().map(Tier::as_str).collect();

        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, description, cover_image, access_level, created_at
            FROM books
            WHERE access_level = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&level_names)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list books: {}", e))
        })?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn delete(&self, id: &BookId) -> Result<(), DomainError> {
        sqlx::query(r#"DELETE FROM books WHERE id = $1"#)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete book: {}", e),
                )
            })?;

        Ok(())
    }
}
