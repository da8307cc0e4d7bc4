//! PostgreSQL adapters.
//!
//! sqlx-backed implementations of the repository ports. Enum columns are
//! stored as lowercase strings; the parse helpers here reject anything
//! outside the closed sets.

mod book_repository;
mod payment_repository;
mod plan_repository;
mod user_repository;

pub use book_repository::PostgresBookRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use plan_repository::PostgresPlanRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::access::{Role, Tier};
use crate::domain::foundation::{DomainError, ErrorCode};

pub(crate) fn parse_tier(s: &str) -> Result<Tier, DomainError> {
    s.parse::<Tier>()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))
}

pub(crate) fn parse_role(s: &str) -> Result<Role, DomainError> {
    s.parse::<Role>()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))
}
