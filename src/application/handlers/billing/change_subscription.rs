//! ChangeSubscriptionHandler - Command handler for a direct tier change.
//!
//! The administrative counterpart to the payment flow: self-or-admin may
//! point a user at any existing plan without a capture.

use std::sync::Arc;

use crate::domain::access::{can_act_on_user, AccessDecision, Role, Tier};
use crate::domain::billing::BillingError;
use crate::domain::foundation::UserId;
use crate::domain::users::User;
use crate::ports::{PlanRepository, UserRepository};

/// Command to set a user's subscription tier.
#[derive(Debug, Clone)]
pub struct ChangeSubscriptionCommand {
    pub requester_id: UserId,
    pub requester_role: Role,
    pub target_user_id: UserId,
    pub plan_name: Tier,
}

/// Handler for direct tier changes.
pub struct ChangeSubscriptionHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl ChangeSubscriptionHandler {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { users, plans }
    }

    pub async fn handle(&self, cmd: ChangeSubscriptionCommand) -> Result<User, BillingError> {
        if let AccessDecision::Deny(_) =
            can_act_on_user(&cmd.requester_id, cmd.requester_role, &cmd.target_user_id)
        {
            return Err(BillingError::NotAuthorized);
        }

        // The tier written must always name an existing plan.
        if self.plans.find_by_name(cmd.plan_name).await?.is_none() {
            return Err(BillingError::plan_not_found(cmd.plan_name.as_str()));
        }

        let mut user = self
            .users
            .find_by_id(&cmd.target_user_id)
            .await?
            .ok_or(BillingError::UserNotFound(cmd.target_user_id))?;

        user.change_tier(cmd.plan_name);
        self.users.update(&user).await?;

        tracing::info!(user = %user.id, tier = %cmd.plan_name, "subscription changed");
        Ok(user)
    }
}
