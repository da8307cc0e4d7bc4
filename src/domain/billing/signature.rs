//! Payment signature verification.
//!
//! Implements verification of gateway payment confirmations using
//! HMAC-SHA256 over `order_id|payment_id` with the shared key secret.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::BillingError;

/// Verifier for gateway payment signatures.
///
/// The key secret is injected at construction; nothing here reads
/// ambient process state.
pub struct SignatureVerifier {
    secret: Secret<String>,
}

impl SignatureVerifier {
    /// Creates a new verifier with the shared gateway key secret.
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// Verifies a payment confirmation signature.
    ///
    /// The expected value is `hex(HMAC-SHA256(secret, order_id + "|" +
    /// payment_id))`; comparison is constant-time so the check cannot be
    /// probed byte-by-byte through response timing.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::VerificationFailed` on any mismatch,
    /// including empty and truncated signatures.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), BillingError> {
        let expected = self.compute_signature(order_id, payment_id);

        if constant_time_compare(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(BillingError::VerificationFailed)
        }
    }

    /// Computes the hex-encoded HMAC-SHA256 signature for an order/payment pair.
    fn compute_signature(&self, order_id: &str, payment_id: &str) -> String {
        let payload = format!("{}|{}", order_id, payment_id);
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// Length is compared first; equal-length slices are compared without
/// data-dependent branches.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the hex signature for use in test fixtures.
pub fn compute_signature_for_tests(secret: &str, order_id: &str, payment_id: &str) -> String {
    let payload = format!("{}|{}", order_id, payment_id);
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
