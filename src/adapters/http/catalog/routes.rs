//! Axum router configuration for catalog endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{create_book, delete_book, get_book, list_books, update_book, CatalogAppState};

/// Create the catalog API router.
///
/// # Routes
///
/// - `GET /` - tier-filtered listing (authenticated)
/// - `GET /:id` - single book, 403 on tier mismatch, 404 on missing
/// - `POST /` - create (admin)
/// - `PUT /:id` - update (admin)
/// - `DELETE /:id` - delete (admin)
pub fn catalog_routes() -> Router<CatalogAppState> {
    Router::new()
        .route("/", get(list_books))
        .route("/", post(create_book))
        .route("/:id", get(get_book))
        .route("/:id", put(update_book))
        .route("/:id", delete(delete_book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::memory::{InMemoryBookRepository, InMemoryUserRepository};

    #[test]
    fn catalog_routes_creates_router() {
        let state = CatalogAppState {
            users: Arc::new(InMemoryUserRepository::new()),
            books: Arc::new(InMemoryBookRepository::new()),
        };
        let _: Router<()> = catalog_routes().with_state(state);
    }
}
