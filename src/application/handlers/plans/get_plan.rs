//! GetPlanHandler - Query handler for reading one plan by name.

use std::sync::Arc;

use crate::domain::access::Tier;
use crate::domain::billing::{BillingError, Plan};
use crate::ports::PlanRepository;

/// Query to read a plan by tier name. Public read.
#[derive(Debug, Clone)]
pub struct GetPlanQuery {
    pub name: Tier,
}

/// Handler for a single plan read.
pub struct GetPlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl GetPlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, query: GetPlanQuery) -> Result<Plan, BillingError> {
        self.plans
            .find_by_name(query.name)
            .await?
            .ok_or_else(|| BillingError::plan_not_found(query.name.as_str()))
    }
}
