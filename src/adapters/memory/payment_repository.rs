//! In-memory implementation of PaymentRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::DomainError;
use crate::ports::{PaymentInsertOutcome, PaymentRepository};

/// In-memory payment record store.
///
/// Enforces the one-record-per-gateway-payment-id invariant the way the
/// PostgreSQL unique constraint does.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    records: Mutex<Vec<PaymentRecord>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all stored records.
    pub fn snapshot(&self) -> Vec<PaymentRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, record: &PaymentRecord) -> Result<PaymentInsertOutcome, DomainError> {
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.gateway_payment_id == record.gateway_payment_id)
        {
            return Ok(PaymentInsertOutcome::DuplicatePaymentId);
        }
        records.push(record.clone());
        Ok(PaymentInsertOutcome::Inserted)
    }

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.gateway_payment_id == gateway_payment_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::Tier;
    use crate::domain::foundation::UserId;

    fn record(payment_id: &str) -> PaymentRecord {
        PaymentRecord::capture(
            UserId::new(),
            Tier::Premium,
            "order_1",
            payment_id,
            "sig",
            19.99,
            "INR",
        )
    }

    #[tokio::test]
    async fn second_insert_with_same_payment_id_is_duplicate() {
        let repo = InMemoryPaymentRepository::new();

        let first = repo.insert(&record("pay_1")).await.unwrap();
        let second = repo.insert(&record("pay_1")).await.unwrap();

        assert_eq!(first, PaymentInsertOutcome::Inserted);
        assert_eq!(second, PaymentInsertOutcome::DuplicatePaymentId);
        assert_eq!(repo.snapshot().len(), 1);
    }
}
