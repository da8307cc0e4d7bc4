//! Axum router configuration for user roster endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers::{delete_user, get_user, list_users, update_user, UsersAppState};

/// Create the users API router.
///
/// # Routes
///
/// - `GET /` - roster listing (admin)
/// - `GET /:id` - one user (self or admin)
/// - `PUT /:id` - update (self or admin; role change admin only)
/// - `DELETE /:id` - delete (admin)
pub fn user_routes() -> Router<UsersAppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}
