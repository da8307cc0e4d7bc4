//! Payment configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
///
/// The key secret doubles as the HMAC key for payment signature
/// verification. It is injected into the gateway adapter and the
/// verifier at construction, never read from ambient globals.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (rzp_test_... or rzp_live_...)
    #[serde(default)]
    pub razorpay_key_id: String,

    /// Razorpay key secret
    #[serde(default = "empty_secret")]
    pub razorpay_key_secret: Secret<String>,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            razorpay_key_id: String::new(),
            razorpay_key_secret: empty_secret(),
        }
    }
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"));
        }

        // Verify the key prefix for safety
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidGatewayKeyId);
        }

        Ok(())
    }
}
