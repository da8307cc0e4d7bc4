//! Subscription plan - the priced record backing a tier.

use serde::{Deserialize, Serialize};

use crate::domain::access::Tier;
use crate::domain::foundation::ValidationError;

/// A subscription plan.
///
/// Keyed by tier name: the registry holds at most one plan per tier.
/// Prices are major currency units; the gateway works in minor units via
/// [`Plan::amount_minor_units`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: Tier,
    pub price: f64,
    pub description: String,
    pub features: Vec<String>,
    pub gateway_plan_id: Option<String>,
}

impl Plan {
    /// Creates a new plan.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a negative price or blank description.
    pub fn new(
        name: Tier,
        price: f64,
        description: impl Into<String>,
        features: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();

        if price < 0.0 || !price.is_finite() {
            return Err(ValidationError::negative("price", price));
        }
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }

        Ok(Self {
            name,
            price,
            description,
            features,
            gateway_plan_id: None,
        })
    }

    /// Returns the price in the gateway's minor unit (e.g. paise),
    /// rounded to the nearest integer.
    pub fn amount_minor_units(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }

    /// Applies a partial update, touching only the supplied fields.
    ///
    /// Presence is modelled with `Option`: `Some(0.0)` sets a zero price,
    /// `None` leaves the stored value alone.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a present-but-negative price.
    pub fn apply(&mut self, update: PlanUpdate) -> Result<(), ValidationError> {
        if let Some(price) = update.price {
            if price < 0.0 || !price.is_finite() {
                return Err(ValidationError::negative("price", price));
            }
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(features) = update.features {
            self.features = features;
        }
        Ok(())
    }
}

/// Partial update to a plan; `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PlanUpdate {
    pub price: Option<f64>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_plan() -> Plan {
        Plan::new(
            Tier::Basic,
            9.99,
            "Access to most books",
            vec!["Access to free and basic books".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn negative_price_rejected() {
        assert!(Plan::new(Tier::Free, -1.0, "d", vec![]).is_err());
    }

    #[test]
    fn zero_price_is_valid() {
        let plan = Plan::new(Tier::Free, 0.0, "Free access", vec![]).unwrap();
        assert_eq!(plan.price, 0.0);
    }

    #[test]
    fn minor_units_round_to_nearest() {
        assert_eq!(basic_plan().amount_minor_units(), 999);
        let plan = Plan::new(Tier::Premium, 19.995, "d", vec![]).unwrap();
        assert_eq!(plan.amount_minor_units(), 2000);
    }

    #[test]
    fn apply_sets_explicit_zero_price() {
        let mut plan = basic_plan();
        plan.apply(PlanUpdate {
            price: Some(0.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plan.price, 0.0);
    }

    #[test]
    fn apply_leaves_omitted_fields_alone() {
        let mut plan = basic_plan();
        plan.apply(PlanUpdate {
            description: Some("Updated".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plan.price, 9.99);
        assert_eq!(plan.description, "Updated");
    }

    #[test]
    fn apply_rejects_negative_price_without_partial_write() {
        let mut plan = basic_plan();
        let result = plan.apply(PlanUpdate {
            price: Some(-5.0),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(plan.price, 9.99);
    }

    #[test]
    fn apply_allows_empty_description_when_present() {
        let mut plan = basic_plan();
        plan.apply(PlanUpdate {
            description: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plan.description, "");
    }
}
