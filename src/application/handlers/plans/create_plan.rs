//! CreatePlanHandler - Command handler for registering a subscription plan.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role, Tier};
use crate::domain::billing::{BillingError, Plan};
use crate::domain::foundation::ErrorCode;
use crate::ports::PlanRepository;

/// Command to create a plan. Admin only.
#[derive(Debug, Clone)]
pub struct CreatePlanCommand {
    pub requester_role: Role,
    pub name: Tier,
    pub price: f64,
    pub description: String,
    pub features: Vec<String>,
}

/// Handler for plan creation.
///
/// The registry holds at most one plan per tier name. The pre-check and
/// the store's uniqueness constraint both report the duplicate as
/// `DuplicatePlan`, so a racing create cannot slip a second plan in.
pub struct CreatePlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl CreatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, cmd: CreatePlanCommand) -> Result<Plan, BillingError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(BillingError::NotAuthorized);
        }

        if self.plans.find_by_name(cmd.name).await?.is_some() {
            return Err(BillingError::duplicate_plan(cmd.name));
        }

        let plan = Plan::new(cmd.name, cmd.price, cmd.description, cmd.features)
            .map_err(|e| BillingError::validation("plan", e.to_string()))?;

        self.plans.save(&plan).await.map_err(|e| {
            if e.code == ErrorCode::PlanExists {
                BillingError::duplicate_plan(cmd.name)
            } else {
                BillingError::from(e)
            }
        })?;

        tracing::info!(plan = %plan.name, price = plan.price, "plan created");
        Ok(plan)
    }
}
