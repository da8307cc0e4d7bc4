//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{PaymentRecord, PaymentStatus};
use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp, UserId};
use crate::ports::{PaymentInsertOutcome, PaymentRepository};

use super::parse_tier;

/// PostgreSQL implementation of the PaymentRepository port.
///
/// `payments.gateway_payment_id` carries a UNIQUE constraint: the insert
/// uses `ON CONFLICT DO NOTHING`, so a duplicate callback resolves to
/// zero affected rows instead of a second record.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment record.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    gateway_order_id: String,
    gateway_payment_id: String,
    gateway_signature: String,
    amount: f64,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_str() {
            "captured" => PaymentStatus::Captured,
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid payment status: {}", other),
                ))
            }
        };

        Ok(PaymentRecord {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan: parse_tier(&row.plan)?,
            gateway_order_id: row.gateway_order_id,
            gateway_payment_id: row.gateway_payment_id,
            gateway_signature: row.gateway_signature,
            amount: row.amount,
            currency: row.currency,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, record: &PaymentRecord) -> Result<PaymentInsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, plan, gateway_order_id, gateway_payment_id,
                gateway_signature, amount, currency, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (gateway_payment_id) DO NOTHING
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_uuid())
        .bind(record.plan.as_str())
        .bind(&record.gateway_order_id)
        .bind(&record.gateway_payment_id)
        .bind(&record.gateway_signature)
        .bind(record.amount)
        .bind(&record.currency)
        .bind(record.status.as_str())
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert payment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            Ok(PaymentInsertOutcome::DuplicatePaymentId)
        } else {
            Ok(PaymentInsertOutcome::Inserted)
        }
    }

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, plan, gateway_order_id, gateway_payment_id,
                   gateway_signature, amount, currency, status, created_at
            FROM payments WHERE gateway_payment_id = $1
            "#,
        )
        .bind(gateway_payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load payment: {}", e),
            )
        })?;

        row.map(PaymentRecord::try_from).transpose()
    }
}
