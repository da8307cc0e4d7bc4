//! Payment record - an immutable receipt of a captured gateway payment.

use serde::{Deserialize, Serialize};

use crate::domain::access::Tier;
use crate::domain::foundation::{PaymentId, Timestamp, UserId};

/// Lifecycle status of a payment.
///
/// Only captured payments are recorded today; the enum leaves room for
/// refund states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Captured,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Captured => "captured",
        }
    }
}

/// A captured payment, written exactly once after signature verification.
///
/// Holds weak references to the paying user and the purchased plan: a
/// later delete of either leaves this record in place, dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub user_id: UserId,
    pub plan: Tier,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
    /// Captured amount in major currency units, as reported by the gateway.
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
}

impl PaymentRecord {
    /// Creates a captured payment record.
    ///
    /// Callers must have verified the signature and fetched the amount
    /// from the gateway first; nothing here comes from client input.
    #[allow(clippy::too_many_arguments)]
    pub fn capture(
        user_id: UserId,
        plan: Tier,
        gateway_order_id: impl Into<String>,
        gateway_payment_id: impl Into<String>,
        gateway_signature: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            plan,
            gateway_order_id: gateway_order_id.into(),
            gateway_payment_id: gateway_payment_id.into(),
            gateway_signature: gateway_signature.into(),
            amount,
            currency: currency.into(),
            status: PaymentStatus::Captured,
            created_at: Timestamp::now(),
        }
    }
}
