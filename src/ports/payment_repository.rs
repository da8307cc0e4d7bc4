//! Payment record repository port.
//!
//! Payment records are write-once. The gateway payment id is the
//! idempotency key: implementations carry a uniqueness constraint on it
//! and report an insert that lost the race as a duplicate, never as a
//! second record.

use async_trait::async_trait;

use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::DomainError;

/// Outcome of a payment record insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentInsertOutcome {
    /// The record was written.
    Inserted,
    /// A record with this gateway payment id already exists; nothing was
    /// written. Callers treat this as success-no-op.
    DuplicatePaymentId,
}

/// Repository port for captured payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a payment record, keyed by its gateway payment id.
    ///
    /// Exactly one record per gateway payment id ever exists; concurrent
    /// duplicate callbacks resolve to one `Inserted` and the rest
    /// `DuplicatePaymentId`.
    async fn insert(&self, record: &PaymentRecord) -> Result<PaymentInsertOutcome, DomainError>;

    /// Find a record by gateway payment id. Returns `None` if not found.
    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }
}
