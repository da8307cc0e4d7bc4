//! Payment gateway port.
//!
//! Contract for the external payment processor: creating orders ahead of
//! checkout and fetching the authoritative capture details afterwards.
//! Amounts cross this boundary in the gateway's minor currency unit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to open an order with the gateway.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    /// Amount in minor units (e.g. paise), derived from the plan price.
    pub amount_minor_units: i64,
    /// ISO currency code.
    pub currency: String,
    /// Server-generated receipt identifier.
    pub receipt: String,
    /// Free-form key/value notes carried on the order (plan id, user id).
    pub notes: Vec<(String, String)>,
}

/// An order as reported by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
}

/// A payment as reported by the gateway. The authoritative source for
/// captured amounts; client-supplied figures are never trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayPayment {
    pub payment_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
}

/// Gateway failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// The gateway rejected the request as malformed.
    InvalidRequest,
    /// The referenced order/payment does not exist at the gateway.
    NotFound,
    /// The gateway could not be reached or returned a server error.
    Unavailable,
}

/// Error returned by gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Port for the external payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for the given amount.
    async fn create_order(&self, request: CreateOrderRequest)
        -> Result<GatewayOrder, GatewayError>;

    /// Fetch a payment's capture details by gateway payment id.
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn gateway_error_displays_code_and_message() {
        let err = GatewayError::new(GatewayErrorCode::Unavailable, "connect timeout");
        assert_eq!(format!("{}", err), "Unavailable: connect timeout");
    }
}
