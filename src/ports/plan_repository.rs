//! Plan repository port.
//!
//! The registry holds at most one plan per tier name; implementations
//! back that with a uniqueness constraint and report a violation as a
//! `PlanExists` conflict.

use async_trait::async_trait;

use crate::domain::access::Tier;
use crate::domain::billing::Plan;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Repository port for the subscription plan registry.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Save a new plan.
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::PlanExists`] if a plan with the same name exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Update an existing plan. Last writer wins.
    async fn update(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Find a plan by its tier name. Returns `None` if not found.
    async fn find_by_name(&self, name: Tier) -> Result<Option<Plan>, DomainError>;

    /// List every plan. Public read.
    async fn list(&self) -> Result<Vec<Plan>, DomainError>;

    /// Delete a plan by name.
    ///
    /// Callers check the in-use invariant first; this is plain removal.
    async fn delete(&self, name: Tier) -> Result<(), DomainError>;
}
