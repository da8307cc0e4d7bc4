//! Axum router configuration for subscription endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    change_subscription, create_order, create_plan, delete_plan, get_plan, list_plans,
    update_plan, verify_payment, SubscriptionsAppState,
};

/// Create the subscriptions API router.
///
/// # Routes
///
/// ## Public
/// - `GET /` - list plans
/// - `GET /:name` - one plan by name
///
/// ## Authenticated
/// - `POST /create-order` - open a gateway order
/// - `POST /verify-payment` - verify a confirmation and upgrade
/// - `PUT /user/:id` - direct tier change (self or admin)
///
/// ## Admin
/// - `POST /` - create plan (400 on duplicate)
/// - `PUT /:name` - partial update
/// - `DELETE /:name` - delete (400 while in use)
pub fn subscription_routes() -> Router<SubscriptionsAppState> {
    Router::new()
        .route("/", get(list_plans))
        .route("/", post(create_plan))
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/user/:id", put(change_subscription))
        .route("/:name", get(get_plan))
        .route("/:name", put(update_plan))
        .route("/:name", delete(delete_plan))
}
