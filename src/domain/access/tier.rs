//! Subscription tier definitions.
//!
//! Represents the subscription tier levels that gate book visibility.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subscription tier.
///
/// Totally ordered: free < basic < premium. A book is visible to a
/// requester whose tier ranks at or above the book's access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free tier - access to free books only. The registration default.
    Free,

    /// Basic tier - access to free and basic books.
    Basic,

    /// Premium tier - access to the whole catalog.
    Premium,
}

impl Tier {
    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = wider access. Mirrors the derived `Ord`.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Basic => 1,
            Tier::Premium => 2,
        }
    }

    /// Returns the lowercase name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Basic => "basic",
            Tier::Premium => "premium",
        }
    }

    /// All tiers in ascending rank order.
    pub fn all() -> [Tier; 3] {
        [Tier::Free, Tier::Basic, Tier::Premium]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "basic" => Ok(Tier::Basic),
            "premium" => Ok(Tier::Premium),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// Error returned when a string does not name one of the fixed tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl std::fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown tier: {}", self.0)
    }
}

impl std::error::Error for UnknownTier {}
