//! HTTP handlers for catalog endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::catalog::{
    CreateBookCommand, CreateBookHandler, DeleteBookCommand, DeleteBookHandler, GetBookHandler,
    GetBookQuery, ListBooksHandler, ListBooksQuery, UpdateBookCommand, UpdateBookHandler,
};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::BookId;
use crate::ports::{BookRepository, UserRepository};

use super::super::error::ErrorResponse;
use super::super::identity::AuthenticatedUser;
use super::dto::{BookResponse, CreateBookRequest, UpdateBookRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for catalog endpoints.
#[derive(Clone)]
pub struct CatalogAppState {
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
}

impl CatalogAppState {
    pub fn list_books_handler(&self) -> ListBooksHandler {
        ListBooksHandler::new(self.users.clone(), self.books.clone())
    }

    pub fn get_book_handler(&self) -> GetBookHandler {
        GetBookHandler::new(self.users.clone(), self.books.clone())
    }

    pub fn create_book_handler(&self) -> CreateBookHandler {
        CreateBookHandler::new(self.books.clone())
    }

    pub fn update_book_handler(&self) -> UpdateBookHandler {
        UpdateBookHandler::new(self.books.clone())
    }

    pub fn delete_book_handler(&self) -> DeleteBookHandler {
        DeleteBookHandler::new(self.books.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/books - List books visible at the requester's tier
pub async fn list_books(
    State(state): State<CatalogAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, CatalogApiError> {
    let handler = state.list_books_handler();
    let books = handler
        .handle(ListBooksQuery {
            requester_id: user.user_id,
        })
        .await?;

    let response: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/books/:id - Read one book, 403 on tier mismatch, 404 on missing
pub async fn get_book(
    State(state): State<CatalogAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let book_id = parse_book_id(&id)?;

    let handler = state.get_book_handler();
    let book = handler
        .handle(GetBookQuery {
            requester_id: user.user_id,
            book_id,
        })
        .await?;

    Ok(Json(BookResponse::from(book)))
}

/// POST /api/books - Create a book (admin only)
pub async fn create_book(
    State(state): State<CatalogAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let handler = state.create_book_handler();
    let book = handler
        .handle(CreateBookCommand {
            requester_role: user.role,
            title: request.title,
            author: request.author,
            description: request.description,
            access_level: request.access_level,
            cover_image: request.cover_image,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// PUT /api/books/:id - Update a book (admin only)
pub async fn update_book(
    State(state): State<CatalogAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let book_id = parse_book_id(&id)?;

    let handler = state.update_book_handler();
    let book = handler
        .handle(UpdateBookCommand {
            requester_role: user.role,
            book_id,
            update: request.into(),
        })
        .await?;

    Ok(Json(BookResponse::from(book)))
}

/// DELETE /api/books/:id - Delete a book (admin only)
pub async fn delete_book(
    State(state): State<CatalogAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let book_id = parse_book_id(&id)?;

    let handler = state.delete_book_handler();
    handler
        .handle(DeleteBookCommand {
            requester_role: user.role,
            book_id,
        })
        .await?;

    Ok(StatusCode::OK)
}

/// A malformed id cannot name any book: report it as not found, the way
/// the lookup of a well-formed unknown id would be.
fn parse_book_id(raw: &str) -> Result<BookId, CatalogApiError> {
    raw.parse::<BookId>()
        .map_err(|_| CatalogApiError(CatalogError::BookNotFound(BookId::new())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts catalog errors to HTTP responses.
pub struct CatalogApiError(CatalogError);

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CatalogError::BookNotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::UpgradeRequired { .. } => StatusCode::FORBIDDEN,
            CatalogError::NotAuthorized => StatusCode::FORBIDDEN,
            CatalogError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "catalog request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::Tier;

    #[test]
    fn api_error_maps_not_found_to_404() {
        let err = CatalogApiError(CatalogError::book_not_found(BookId::new()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_upgrade_required_to_403() {
        let err = CatalogApiError(CatalogError::upgrade_required(Tier::Premium, Tier::Free));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn api_error_maps_not_authorized_to_403() {
        let err = CatalogApiError(CatalogError::not_authorized());
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn api_error_maps_validation_to_400() {
        let err = CatalogApiError(CatalogError::validation("title", "empty"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_infrastructure_to_500() {
        let err = CatalogApiError(CatalogError::infrastructure("db down"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn malformed_id_reads_as_not_found() {
        let err = parse_book_id("not-a-uuid").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
