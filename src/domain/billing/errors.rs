//! Billing-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | PlanNotFound | 404 |
//! | UserNotFound | 404 |
//! | DuplicatePlan | 400 |
//! | PlanInUse | 400 |
//! | VerificationFailed | 400 |
//! | NotAuthorized | 403 |
//! | ValidationFailed | 400 |
//! | Gateway | 500 |
//! | Infrastructure | 500 |

use crate::domain::access::Tier;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Billing and plan-registry errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BillingError {
    /// No plan exists with this name.
    PlanNotFound(String),

    /// A plan with this tier name already exists.
    DuplicatePlan(Tier),

    /// The plan is still referenced by at least one user.
    PlanInUse { plan: Tier, user_count: u64 },

    /// The paying user does not exist.
    UserNotFound(UserId),

    /// Payment signature verification failed.
    VerificationFailed,

    /// The requester may not perform this registry action.
    NotAuthorized,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// The payment gateway call failed.
    Gateway(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl BillingError {
    pub fn plan_not_found(name: impl Into<String>) -> Self {
        BillingError::PlanNotFound(name.into())
    }

    pub fn duplicate_plan(plan: Tier) -> Self {
        BillingError::DuplicatePlan(plan)
    }

    pub fn plan_in_use(plan: Tier, user_count: u64) -> Self {
        BillingError::PlanInUse { plan, user_count }
    }

    pub fn user_not_found(id: UserId) -> Self {
        BillingError::UserNotFound(id)
    }

    pub fn verification_failed() -> Self {
        BillingError::VerificationFailed
    }

    pub fn not_authorized() -> Self {
        BillingError::NotAuthorized
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        BillingError::Gateway(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BillingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            BillingError::DuplicatePlan(_) => ErrorCode::PlanExists,
            BillingError::PlanInUse { .. } => ErrorCode::PlanInUse,
            BillingError::UserNotFound(_) => ErrorCode::UserNotFound,
            BillingError::VerificationFailed => ErrorCode::PaymentVerificationFailed,
            BillingError::NotAuthorized => ErrorCode::Forbidden,
            BillingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BillingError::Gateway(_) => ErrorCode::GatewayError,
            BillingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    ///
    /// Gateway and infrastructure failures surface generically; the
    /// underlying detail goes to the log, not the response.
    pub fn message(&self) -> String {
        match self {
            BillingError::PlanNotFound(_) => "Subscription plan not found".to_string(),
            BillingError::DuplicatePlan(_) => "Subscription plan already exists".to_string(),
            BillingError::PlanInUse { .. } => {
                "Cannot delete subscription plan that is in use by users".to_string()
            }
            BillingError::UserNotFound(_) => "User not found".to_string(),
            BillingError::VerificationFailed => "Payment verification failed".to_string(),
            BillingError::NotAuthorized => "Not authorized".to_string(),
            BillingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BillingError::Gateway(_) => "Payment service unavailable".to_string(),
            BillingError::Infrastructure(_) => "Server error".to_string(),
        }
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BillingError {}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        BillingError::Infrastructure(err.to_string())
    }
}

impl From<BillingError> for DomainError {
    fn from(err: BillingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failure_has_precise_message() {
        let err = BillingError::verification_failed();
        assert_eq!(err.message(), "Payment verification failed");
        assert_eq!(err.code(), ErrorCode::PaymentVerificationFailed);
    }

    #[test]
    fn gateway_detail_is_not_surfaced() {
        let err = BillingError::gateway("connect timeout to api.razorpay.com");
        assert!(!err.message().contains("razorpay"));
    }

    #[test]
    fn plan_in_use_is_a_conflict_code() {
        let err = BillingError::plan_in_use(Tier::Basic, 3);
        assert_eq!(err.code(), ErrorCode::PlanInUse);
    }

    #[test]
    fn converts_to_domain_error() {
        let err = BillingError::duplicate_plan(Tier::Free);
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());
    }
}
