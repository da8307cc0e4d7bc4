//! Razorpay gateway adapters - the real client and an in-process mock.

mod mock_gateway;
mod razorpay_gateway;

pub use mock_gateway::MockGateway;
pub use razorpay_gateway::{RazorpayConfig, RazorpayGateway};
