//! HTTP adapter - Axum routers, DTOs, and error mapping.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod subscriptions;
pub mod users;

use axum::{routing::get, Router};

pub use catalog::{catalog_routes, CatalogAppState};
pub use error::ErrorResponse;
pub use identity::AuthenticatedUser;
pub use subscriptions::{subscription_routes, SubscriptionsAppState};
pub use users::{user_routes, UsersAppState};

/// Liveness probe. No auth, no dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Compose the full API router.
///
/// Everything the service serves hangs off here; `main` adds the
/// tracing and CORS layers around it.
pub fn api_router(
    catalog: CatalogAppState,
    subscriptions: SubscriptionsAppState,
    users: UsersAppState,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/books", catalog_routes().with_state(catalog))
        .nest(
            "/api/subscriptions",
            subscription_routes().with_state(subscriptions),
        )
        .nest("/api/users", user_routes().with_state(users))
}
