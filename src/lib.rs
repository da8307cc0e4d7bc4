//! BookVault - Subscription-Gated Digital Library Backend
//!
//! Users browse and read books whose visibility is gated by a three-tier
//! subscription (free/basic/premium); admins manage the catalog, the
//! roster, and the plan registry; verified gateway payments raise a
//! user's tier.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
