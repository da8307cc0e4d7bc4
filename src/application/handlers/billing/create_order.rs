//! CreateOrderHandler - Command handler for opening a gateway order.

use std::sync::Arc;

use crate::domain::access::Tier;
use crate::domain::billing::BillingError;
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{CreateOrderRequest, PaymentGateway, PlanRepository};

/// Default currency when the client supplies none.
const DEFAULT_CURRENCY: &str = "INR";

/// Command to create a payment order for a plan purchase.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub requester_id: UserId,
    pub plan_name: Tier,
    pub currency: Option<String>,
}

/// Result of order creation, echoed back to the checkout client.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
    pub plan_name: Tier,
}

/// Handler for order creation.
///
/// The amount is derived from the plan's stored price, never from
/// client input.
pub struct CreateOrderHandler {
    plans: Arc<dyn PlanRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateOrderHandler {
    pub fn new(plans: Arc<dyn PlanRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { plans, gateway }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, BillingError> {
        let plan = self
            .plans
            .find_by_name(cmd.plan_name)
            .await?
            .ok_or_else(|| BillingError::plan_not_found(cmd.plan_name.as_str()))?;

        let request = CreateOrderRequest {
            amount_minor_units: plan.amount_minor_units(),
            currency: cmd.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            receipt: format!("receipt_order_{}", Timestamp::now().as_unix_millis()),
            notes: vec![
                ("plan".to_string(), plan.name.as_str().to_string()),
                ("user_id".to_string(), cmd.requester_id.to_string()),
            ],
        };

        let order = self.gateway.create_order(request).await.map_err(|e| {
            tracing::error!(error = %e, plan = %plan.name, "order creation failed");
            BillingError::gateway(e.to_string())
        })?;

        Ok(CreateOrderResult {
            order_id: order.order_id,
            amount_minor_units: order.amount_minor_units,
            currency: order.currency,
            plan_name: plan.name,
        })
    }
}
