//! Catalog-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | BookNotFound | 404 |
//! | UpgradeRequired | 403 |
//! | NotAuthorized | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::access::Tier;
use crate::domain::foundation::{BookId, DomainError, ErrorCode};

/// Catalog-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No book exists with this id. Distinct from a tier denial.
    BookNotFound(BookId),

    /// The requester's tier ranks below the book's access level.
    UpgradeRequired { required: Tier, current: Tier },

    /// The requester may not perform this catalog action.
    NotAuthorized,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl CatalogError {
    pub fn book_not_found(id: BookId) -> Self {
        CatalogError::BookNotFound(id)
    }

    pub fn upgrade_required(required: Tier, current: Tier) -> Self {
        CatalogError::UpgradeRequired { required, current }
    }

    pub fn not_authorized() -> Self {
        CatalogError::NotAuthorized
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::BookNotFound(_) => ErrorCode::BookNotFound,
            CatalogError::UpgradeRequired { .. } => ErrorCode::UpgradeRequired,
            CatalogError::NotAuthorized => ErrorCode::Forbidden,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    ///
    /// The upgrade message never includes anything about the book beyond
    /// the level that gates it.
    pub fn message(&self) -> String {
        match self {
            CatalogError::BookNotFound(_) => "Book not found".to_string(),
            CatalogError::UpgradeRequired { .. } => {
                "Upgrade subscription to access this book".to_string()
            }
            CatalogError::NotAuthorized => "Not authorized".to_string(),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        CatalogError::Infrastructure(err.to_string())
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_omits_book_details() {
        let err = CatalogError::book_not_found(BookId::new());
        assert_eq!(err.message(), "Book not found");
        assert_eq!(err.code(), ErrorCode::BookNotFound);
    }

    #[test]
    fn upgrade_required_message_reveals_no_content() {
        let err = CatalogError::upgrade_required(Tier::Premium, Tier::Free);
        assert_eq!(err.message(), "Upgrade subscription to access this book");
        assert_eq!(err.code(), ErrorCode::UpgradeRequired);
    }

    #[test]
    fn not_found_and_denied_are_distinct_codes() {
        let missing = CatalogError::book_not_found(BookId::new());
        let denied = CatalogError::upgrade_required(Tier::Basic, Tier::Free);
        assert_ne!(missing.code(), denied.code());
    }

    #[test]
    fn converts_to_domain_error() {
        let err = CatalogError::not_authorized();
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());
    }
}
