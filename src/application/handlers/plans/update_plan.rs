//! UpdatePlanHandler - Command handler for editing a subscription plan.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role, Tier};
use crate::domain::billing::{BillingError, Plan, PlanUpdate};
use crate::ports::PlanRepository;

/// Command to update a plan. Admin only.
///
/// Fields are `Option`s: presence decides whether a field changes, so an
/// explicit zero price or empty description goes through.
#[derive(Debug, Clone)]
pub struct UpdatePlanCommand {
    pub requester_role: Role,
    pub name: Tier,
    pub update: PlanUpdate,
}

/// Handler for plan updates. Read-then-write, last writer wins.
pub struct UpdatePlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl UpdatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, cmd: UpdatePlanCommand) -> Result<Plan, BillingError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(BillingError::NotAuthorized);
        }

        let mut plan = self
            .plans
            .find_by_name(cmd.name)
            .await?
            .ok_or_else(|| BillingError::plan_not_found(cmd.name.as_str()))?;

        plan.apply(cmd.update)
            .map_err(|e| BillingError::validation("plan", e.to_string()))?;

        self.plans.update(&plan).await?;
        Ok(plan)
    }
}
