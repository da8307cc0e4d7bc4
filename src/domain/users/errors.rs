//! User-roster error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | NotAuthorized | 403 |
//! | RoleChangeForbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// User-roster errors.
#[derive(Debug, Clone, PartialEq)]
pub enum UserError {
    /// No user exists with this id.
    NotFound(UserId),

    /// The requester is neither an admin nor the target user.
    NotAuthorized,

    /// Role mutation attempted by a non-admin (including on self).
    RoleChangeForbidden,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }

    pub fn not_authorized() -> Self {
        UserError::NotAuthorized
    }

    pub fn role_change_forbidden() -> Self {
        UserError::RoleChangeForbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::NotAuthorized => ErrorCode::Forbidden,
            UserError::RoleChangeForbidden => ErrorCode::Forbidden,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(_) => "User not found".to_string(),
            UserError::NotAuthorized => "Not authorized".to_string(),
            UserError::RoleChangeForbidden => "Not authorized to change role".to_string(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        UserError::Infrastructure(err.to_string())
    }
}

impl From<UserError> for DomainError {
    fn from(err: UserError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
