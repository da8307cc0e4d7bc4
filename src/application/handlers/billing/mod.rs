//! Billing operation handlers - orders, payment verification, tier changes.

mod change_subscription;
mod create_order;
mod verify_payment;

pub use change_subscription::{ChangeSubscriptionCommand, ChangeSubscriptionHandler};
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
