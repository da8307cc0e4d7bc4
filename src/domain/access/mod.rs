//! Access control domain - subscription tiers, roles, and the gating rules.

mod evaluator;
mod role;
mod tier;

pub use evaluator::{
    can_act_on_user, can_change_role, can_manage_catalog, can_read_book, visible_levels,
    AccessDecision, DenialReason,
};
pub use role::{Role, UnknownRole};
pub use tier::{Tier, UnknownTier};
