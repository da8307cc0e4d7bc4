//! VerifyPaymentHandler - Command handler for the payment confirmation
//! callback that raises a user's tier.

use std::sync::Arc;

use crate::domain::access::Tier;
use crate::domain::billing::{BillingError, PaymentRecord, SignatureVerifier};
use crate::domain::foundation::UserId;
use crate::ports::{
    PaymentGateway, PaymentInsertOutcome, PaymentRepository, PlanRepository, UserRepository,
};

/// Command carrying a claimed payment confirmation.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub requester_id: UserId,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub plan_name: Tier,
}

/// Result of a verified payment.
#[derive(Debug, Clone)]
pub struct VerifyPaymentResult {
    /// The tier now recorded on the paying user.
    pub tier: Tier,
    /// The captured payment record.
    pub payment: PaymentRecord,
    /// True when this payment id had already been processed and the call
    /// was a no-op.
    pub already_processed: bool,
}

/// Handler for the verify-payment callback.
///
/// The sequence is fixed: verify the signature, resolve the plan, fetch
/// the authoritative amount from the gateway, persist the record, and
/// only then apply the tier. A failure at any step leaves the user's
/// tier untouched. The gateway payment id is the idempotency key:
/// repeating a processed callback returns the stored record without a
/// second capture or a second tier application.
pub struct VerifyPaymentHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
    verifier: Arc<SignatureVerifier>,
}

impl VerifyPaymentHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        plans: Arc<dyn PlanRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
        verifier: Arc<SignatureVerifier>,
    ) -> Self {
        Self {
            users,
            plans,
            payments,
            gateway,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, BillingError> {
        // 1. Authenticity first; nothing below runs on a bad signature.
        self.verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature)?;

        // 2. Resolve the claimed plan.
        let plan = self
            .plans
            .find_by_name(cmd.plan_name)
            .await?
            .ok_or_else(|| BillingError::plan_not_found(cmd.plan_name.as_str()))?;

        // 3. Replayed callback: report the stored outcome, touch nothing.
        if let Some(existing) = self
            .payments
            .find_by_gateway_payment_id(&cmd.payment_id)
            .await?
        {
            tracing::debug!(payment = %cmd.payment_id, "duplicate verification callback");
            return Ok(VerifyPaymentResult {
                tier: existing.plan,
                payment: existing,
                already_processed: true,
            });
        }

        // 4. Authoritative capture details from the gateway.
        let capture = self
            .gateway
            .fetch_payment(&cmd.payment_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, payment = %cmd.payment_id, "payment fetch failed");
                BillingError::gateway(e.to_string())
            })?;

        let record = PaymentRecord::capture(
            cmd.requester_id,
            plan.name,
            cmd.order_id,
            cmd.payment_id,
            cmd.signature,
            capture.amount_minor_units as f64 / 100.0,
            capture.currency,
        );

        // 5. Persist before the tier moves; losing the insert race means
        //    another callback already granted it.
        match self.payments.insert(&record).await? {
            PaymentInsertOutcome::Inserted => {}
            PaymentInsertOutcome::DuplicatePaymentId => {
                let existing = self
                    .payments
                    .find_by_gateway_payment_id(&record.gateway_payment_id)
                    .await?
                    .unwrap_or(record);
                return Ok(VerifyPaymentResult {
                    tier: existing.plan,
                    payment: existing,
                    already_processed: true,
                });
            }
        }

        // 6. Apply the tier.
        let mut user = self
            .users
            .find_by_id(&cmd.requester_id)
            .await?
            .ok_or(BillingError::UserNotFound(cmd.requester_id))?;
        user.change_tier(plan.name);
        self.users.update(&user).await?;

        tracing::info!(
            user = %user.id,
            tier = %plan.name,
            payment = %record.gateway_payment_id,
            "subscription upgraded"
        );

        Ok(VerifyPaymentResult {
            tier: plan.name,
            payment: record,
            already_processed: false,
        })
    }
}
