//! DeletePlanHandler - Command handler for removing a subscription plan.

use std::sync::Arc;

use crate::domain::access::{can_manage_catalog, AccessDecision, Role, Tier};
use crate::domain::billing::BillingError;
use crate::ports::{PlanRepository, UserRepository};

/// Command to delete a plan. Admin only.
#[derive(Debug, Clone)]
pub struct DeletePlanCommand {
    pub requester_role: Role,
    pub name: Tier,
}

/// Handler for plan deletion.
///
/// A plan stays deletable only while no user references its name; the
/// reference count is taken fresh from the store on every call.
pub struct DeletePlanHandler {
    plans: Arc<dyn PlanRepository>,
    users: Arc<dyn UserRepository>,
}

impl DeletePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { plans, users }
    }

    pub async fn handle(&self, cmd: DeletePlanCommand) -> Result<(), BillingError> {
        if let AccessDecision::Deny(_) = can_manage_catalog(cmd.requester_role) {
            return Err(BillingError::NotAuthorized);
        }

        if self.plans.find_by_name(cmd.name).await?.is_none() {
            return Err(BillingError::plan_not_found(cmd.name.as_str()));
        }

        let user_count = self.users.count_by_tier(cmd.name).await?;
        if user_count > 0 {
            return Err(BillingError::plan_in_use(cmd.name, user_count));
        }

        self.plans.delete(cmd.name).await?;

        tracing::info!(plan = %cmd.name, "plan deleted");
        Ok(())
    }
}
