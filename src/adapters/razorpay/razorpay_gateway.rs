//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Razorpay REST API.
//! Orders are opened ahead of checkout; capture details are fetched back
//! by payment id so amounts never come from the client.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret);
//! let gateway = RazorpayGateway::new(config);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{
    CreateOrderRequest, GatewayError, GatewayErrorCode, GatewayOrder, GatewayPayment,
    PaymentGateway,
};

/// Bounded timeout for gateway calls. The upstream behavior has no retry;
/// a slow gateway fails the request instead of holding it open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Razorpay API configuration.
///
/// Credentials are injected here at construction and nowhere else; the
/// adapter holds no ambient process state.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_test_... or rzp_live_...).
    key_id: String,

    /// Key secret, shared with signature verification.
    key_secret: Secret<String>,

    /// Base URL for the Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    /// Create a new Razorpay configuration.
    pub fn new(key_id: impl Into<String>, key_secret: Secret<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Wire format for order creation.
#[derive(Debug, Serialize)]
struct OrderBody {
    amount: i64,
    currency: String,
    receipt: String,
    notes: HashMap<String, String>,
}

/// Order as returned by the Razorpay API.
#[derive(Debug, Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: i64,
    currency: String,
}

/// Payment as returned by the Razorpay API.
#[derive(Debug, Deserialize)]
struct RazorpayPayment {
    id: String,
    amount: i64,
    currency: String,
}

/// Razorpay gateway adapter.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    /// Create a new gateway adapter with the given configuration.
    pub fn new(config: RazorpayConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config,
            http_client,
        }
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(
            &self.config.key_id,
            Some(self.config.key_secret.expose_secret()),
        )
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);

        let body = OrderBody {
            amount: request.amount_minor_units,
            currency: request.currency,
            receipt: request.receipt,
            notes: request.notes.into_iter().collect(),
        };

        let response = self
            .auth(self.http_client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::new(GatewayErrorCode::Unavailable, e.to_string()))?;

        if response.status().is_client_error() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Razorpay order creation rejected");
            return Err(GatewayError::new(GatewayErrorCode::InvalidRequest, error_text));
        }
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Razorpay order creation failed");
            return Err(GatewayError::new(GatewayErrorCode::Unavailable, error_text));
        }

        let order: RazorpayOrder = response.json().await.map_err(|e| {
            GatewayError::new(
                GatewayErrorCode::Unavailable,
                format!("Failed to parse Razorpay response: {}", e),
            )
        })?;

        Ok(GatewayOrder {
            order_id: order.id,
            amount_minor_units: order.amount,
            currency: order.currency,
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let url = format!("{}/v1/payments/{}", self.config.api_base_url, payment_id);

        let response = self
            .auth(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| GatewayError::new(GatewayErrorCode::Unavailable, e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::new(
                GatewayErrorCode::NotFound,
                format!("No payment {}", payment_id),
            ));
        }
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Razorpay payment fetch failed");
            return Err(GatewayError::new(GatewayErrorCode::Unavailable, error_text));
        }

        let payment: RazorpayPayment = response.json().await.map_err(|e| {
            GatewayError::new(
                GatewayErrorCode::Unavailable,
                format!("Failed to parse Razorpay response: {}", e),
            )
        })?;

        Ok(GatewayPayment {
            payment_id: payment.id,
            amount_minor_units: payment.amount,
            currency: payment.currency,
        })
    }
}
