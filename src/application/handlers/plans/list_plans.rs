//! ListPlansHandler - Query handler for the public plan listing.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Plan};
use crate::ports::PlanRepository;

/// Handler for listing all subscription plans. Public read.
pub struct ListPlansHandler {
    plans: Arc<dyn PlanRepository>,
}

impl ListPlansHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self) -> Result<Vec<Plan>, BillingError> {
        let plans = self.plans.list().await?;
        Ok(plans)
    }
}
