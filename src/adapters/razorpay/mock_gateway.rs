//! Mock payment gateway for tests and local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{
    CreateOrderRequest, GatewayError, GatewayErrorCode, GatewayOrder, GatewayPayment,
    PaymentGateway,
};

/// In-process gateway double.
///
/// Orders get sequential ids; payments must be registered up front with
/// [`MockGateway::register_payment`], mirroring the way a real capture
/// exists at the gateway before the verification callback arrives.
#[derive(Default)]
pub struct MockGateway {
    order_counter: Mutex<u64>,
    payments: Mutex<HashMap<String, GatewayPayment>>,
    fail_orders: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway whose order creation always fails.
    pub fn failing() -> Self {
        Self {
            fail_orders: true,
            ..Self::default()
        }
    }

    /// Registers a captured payment that `fetch_payment` will report.
    pub fn register_payment(&self, payment_id: &str, amount_minor_units: i64, currency: &str) {
        self.payments.lock().unwrap().insert(
            payment_id.to_string(),
            GatewayPayment {
                payment_id: payment_id.to_string(),
                amount_minor_units,
                currency: currency.to_string(),
            },
        );
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        if self.fail_orders {
            return Err(GatewayError::new(
                GatewayErrorCode::Unavailable,
                "mock gateway configured to fail",
            ));
        }

        let mut counter = self.order_counter.lock().unwrap();
        *counter += 1;

        Ok(GatewayOrder {
            order_id: format!("order_mock_{}", counter),
            amount_minor_units: request.amount_minor_units,
            currency: request.currency,
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        self.payments
            .lock()
            .unwrap()
            .get(payment_id)
            .cloned()
            .ok_or_else(|| {
                GatewayError::new(
                    GatewayErrorCode::NotFound,
                    format!("No payment {}", payment_id),
                )
            })
    }
}
