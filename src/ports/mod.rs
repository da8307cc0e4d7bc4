//! Ports - async trait contracts for every external collaborator.

mod book_repository;
mod payment_gateway;
mod payment_repository;
mod plan_repository;
mod user_repository;

pub use book_repository::BookRepository;
pub use payment_gateway::{
    CreateOrderRequest, GatewayError, GatewayErrorCode, GatewayOrder, GatewayPayment,
    PaymentGateway,
};
pub use payment_repository::{PaymentInsertOutcome, PaymentRepository};
pub use plan_repository::PlanRepository;
pub use user_repository::UserRepository;
