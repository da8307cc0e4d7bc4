//! Access evaluation - the allow/deny decisions behind every request.
//!
//! Pure functions over the requester's identity and the target resource.
//! Every decision is taken fresh from stored state on each request; a
//! tier change is effective on the very next read.

use crate::domain::foundation::UserId;

use super::{Role, Tier};

/// Outcome of an access check.
///
/// Denials carry the reason so callers can surface a precise message
/// without leaking anything about the resource body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenialReason),
}

impl AccessDecision {
    /// Returns true if access was granted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// Converts the decision into a `Result`, with the denial reason as error.
    pub fn into_result(self) -> Result<(), DenialReason> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(reason) => Err(reason),
        }
    }
}

/// Why an access check denied the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The requester's tier ranks below the book's access level.
    UpgradeRequired { required: Tier, current: Tier },
    /// The requester is neither an admin nor the resource owner.
    NotOwner,
    /// The action is reserved for admins.
    AdminOnly,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::UpgradeRequired { required, current } => write!(
                f,
                "Upgrade subscription to access this book (requires {}, current {})",
                required, current
            ),
            DenialReason::NotOwner => write!(f, "Not authorized"),
            DenialReason::AdminOnly => write!(f, "Not authorized"),
        }
    }
}

/// Decides whether a requester at `tier` may read a book gated at `access_level`.
///
/// Allow iff the requester's tier ranks at or above the book's level under
/// the total order free < basic < premium. Premium readers see everything.
pub fn can_read_book(tier: Tier, access_level: Tier) -> AccessDecision {
    if tier >= access_level {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenialReason::UpgradeRequired {
            required: access_level,
            current: tier,
        })
    }
}

/// Decides whether a requester may read or update another user's record.
///
/// Admins may act on anyone; everyone else only on themselves. Role-field
/// mutation is checked separately via [`can_change_role`].
pub fn can_act_on_user(
    requester_id: &UserId,
    requester_role: Role,
    target_id: &UserId,
) -> AccessDecision {
    match requester_role {
        Role::Admin => AccessDecision::Allow,
        Role::User => {
            if requester_id == target_id {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenialReason::NotOwner)
            }
        }
    }
}

/// Decides whether a requester may change a user's role.
///
/// Admin only, even when editing one's own record: a user may not
/// self-promote.
pub fn can_change_role(requester_role: Role) -> AccessDecision {
    match requester_role {
        Role::Admin => AccessDecision::Allow,
        Role::User => AccessDecision::Deny(DenialReason::AdminOnly),
    }
}

/// Decides whether a requester may mutate the catalog or the plan registry.
pub fn can_manage_catalog(requester_role: Role) -> AccessDecision {
    match requester_role {
        Role::Admin => AccessDecision::Allow,
        Role::User => AccessDecision::Deny(DenialReason::AdminOnly),
    }
}

/// Returns the book access levels visible to a requester at `tier`.
///
/// Drives the tier-filtered catalog listing.
pub fn visible_levels(tier: Tier) -> Vec<Tier> {
    Tier::all().into_iter().filter(|l| *l <= tier).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_tier() -> impl Strategy<Value = Tier> {
        prop_oneof![Just(Tier::Free), Just(Tier::Basic), Just(Tier::Premium)]
    }

    // ════════════════════════════════════════════════════════════════
    // Book gating
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn equal_tier_reads_book() {
        assert!(can_read_book(Tier::Basic, Tier::Basic).is_allowed());
    }

    #[test]
    fn premium_reads_everything() {
        for level in Tier::all() {
            assert!(can_read_book(Tier::Premium, level).is_allowed());
        }
    }

    #[test]
    fn free_denied_premium_with_upgrade_reason() {
        let decision = can_read_book(Tier::Free, Tier::Premium);
        assert_eq!(
            decision,
            AccessDecision::Deny(DenialReason::UpgradeRequired {
                required: Tier::Premium,
                current: Tier::Free,
            })
        );
    }

    #[test]
    fn free_denied_basic() {
        assert!(!can_read_book(Tier::Free, Tier::Basic).is_allowed());
    }

    #[test]
    fn basic_denied_premium() {
        assert!(!can_read_book(Tier::Basic, Tier::Premium).is_allowed());
    }

    proptest! {
        // Raising a reader's tier never takes a book away.
        #[test]
        fn access_is_monotonic_in_tier(level in any_tier(), low in any_tier(), high in any_tier()) {
            prop_assume!(low <= high);
            if can_read_book(low, level).is_allowed() {
                prop_assert!(can_read_book(high, level).is_allowed());
            }
        }

        #[test]
        fn decision_matches_rank_comparison(tier in any_tier(), level in any_tier()) {
            prop_assert_eq!(
                can_read_book(tier, level).is_allowed(),
                tier.rank() >= level.rank()
            );
        }
    }

    // ════════════════════════════════════════════════════════════════
    // User record access
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn admin_acts_on_any_user() {
        let admin = UserId::new();
        let target = UserId::new();
        assert!(can_act_on_user(&admin, Role::Admin, &target).is_allowed());
    }

    #[test]
    fn user_acts_on_self() {
        let id = UserId::new();
        assert!(can_act_on_user(&id, Role::User, &id).is_allowed());
    }

    #[test]
    fn user_denied_on_stranger() {
        let requester = UserId::new();
        let target = UserId::new();
        let decision = can_act_on_user(&requester, Role::User, &target);
        assert_eq!(decision, AccessDecision::Deny(DenialReason::NotOwner));
    }

    // ════════════════════════════════════════════════════════════════
    // Role mutation and catalog management
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn non_admin_cannot_change_role_even_for_self() {
        assert_eq!(
            can_change_role(Role::User),
            AccessDecision::Deny(DenialReason::AdminOnly)
        );
    }

    #[test]
    fn admin_changes_roles() {
        assert!(can_change_role(Role::Admin).is_allowed());
    }

    #[test]
    fn only_admin_manages_catalog() {
        assert!(can_manage_catalog(Role::Admin).is_allowed());
        assert!(!can_manage_catalog(Role::User).is_allowed());
    }

    // ════════════════════════════════════════════════════════════════
    // Visibility filter
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn free_sees_only_free() {
        assert_eq!(visible_levels(Tier::Free), vec![Tier::Free]);
    }

    #[test]
    fn basic_sees_free_and_basic() {
        assert_eq!(visible_levels(Tier::Basic), vec![Tier::Free, Tier::Basic]);
    }

    #[test]
    fn premium_sees_all_levels() {
        assert_eq!(visible_levels(Tier::Premium).len(), 3);
    }

    #[test]
    fn visible_levels_agree_with_gating() {
        for tier in Tier::all() {
            for level in Tier::all() {
                let listed = visible_levels(tier).contains(&level);
                assert_eq!(listed, can_read_book(tier, level).is_allowed());
            }
        }
    }
}
