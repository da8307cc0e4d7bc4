//! HTTP DTOs for subscription endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::{CreateOrderResult, VerifyPaymentResult};
use crate::domain::access::{Role, Tier};
use crate::domain::billing::{PaymentRecord, PaymentStatus, Plan};
use crate::domain::users::User;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanRequest {
    pub name: Tier,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Request to update a plan. Absent fields stay unchanged; present
/// falsy values (zero price, empty description) are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlanRequest {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

/// Request to open a payment order for a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub plan: Tier,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Payment confirmation callback body.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub plan: Tier,
}

/// Request to set a user's subscription directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeSubscriptionRequest {
    pub plan: Tier,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A plan as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub name: Tier,
    pub price: f64,
    pub description: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_plan_id: Option<String>,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            name: plan.name,
            price: plan.price,
            description: plan.description,
            features: plan.features,
            gateway_plan_id: plan.gateway_plan_id,
        }
    }
}

/// Response for a created payment order.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Amount in the gateway's minor unit.
    pub amount: i64,
    pub currency: String,
    pub subscription_name: Tier,
}

impl From<CreateOrderResult> for CreateOrderResponse {
    fn from(result: CreateOrderResult) -> Self {
        Self {
            order_id: result.order_id,
            amount: result.amount_minor_units,
            currency: result.currency,
            subscription_name: result.plan_name,
        }
    }
}

/// A captured payment as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub user_id: String,
    pub plan: Tier,
    pub order_id: String,
    pub payment_id: String,
    /// Captured amount in major units, as reported by the gateway.
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            plan: record.plan,
            order_id: record.gateway_order_id,
            payment_id: record.gateway_payment_id,
            amount: record.amount,
            currency: record.currency,
            status: record.status,
            created_at: record.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a verified payment.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub subscription: Tier,
    pub payment: PaymentResponse,
}

impl From<VerifyPaymentResult> for VerifyPaymentResponse {
    fn from(result: VerifyPaymentResult) -> Self {
        Self {
            success: true,
            subscription: result.tier,
            payment: PaymentResponse::from(result.payment),
        }
    }
}

/// The updated subscriber echoed back after a direct tier change.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriberResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub subscription: Tier,
}

impl From<User> for SubscriberResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            role: user.role,
            subscription: user.tier,
        }
    }
}
