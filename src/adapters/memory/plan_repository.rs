//! In-memory implementation of PlanRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::access::Tier;
use crate::domain::billing::Plan;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PlanRepository;

/// In-memory plan registry.
#[derive(Default)]
pub struct InMemoryPlanRepository {
    plans: Mutex<Vec<Plan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the given plans.
    pub fn with_plans(plans: Vec<Plan>) -> Self {
        Self {
            plans: Mutex::new(plans),
        }
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut plans = self.plans.lock().unwrap();
        if plans.iter().any(|p| p.name == plan.name) {
            return Err(DomainError::new(
                ErrorCode::PlanExists,
                "Subscription plan already exists",
            ));
        }
        plans.push(plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut plans = self.plans.lock().unwrap();
        if let Some(stored) = plans.iter_mut().find(|p| p.name == plan.name) {
            *stored = plan.clone();
        }
        Ok(())
    }

    async fn find_by_name(&self, name: Tier) -> Result<Option<Plan>, DomainError> {
        Ok(self.plans.lock().unwrap().iter().find(|p| p.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Plan>, DomainError> {
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn delete(&self, name: Tier) -> Result<(), DomainError> {
        self.plans.lock().unwrap().retain(|p| p.name != name);
        Ok(())
    }
}
