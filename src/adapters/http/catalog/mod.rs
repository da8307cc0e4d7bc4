//! Catalog HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CatalogAppState;
pub use routes::catalog_routes;
