//! Billing domain - plans, payments, and signature verification.

mod errors;
mod payment_record;
mod plan;
mod signature;

pub use errors::BillingError;
pub use payment_record::{PaymentRecord, PaymentStatus};
pub use plan::{Plan, PlanUpdate};
pub use signature::{compute_signature_for_tests, SignatureVerifier};
