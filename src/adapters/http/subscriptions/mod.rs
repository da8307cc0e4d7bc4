//! Subscriptions HTTP adapter - plans, payments, tier changes.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SubscriptionsAppState;
pub use routes::subscription_routes;
