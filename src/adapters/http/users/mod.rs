//! Users HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::UsersAppState;
pub use routes::user_routes;
