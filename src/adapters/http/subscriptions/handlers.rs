//! HTTP handlers for subscription endpoints.
//!
//! Covers the plan registry, the payment order/verification flow, and
//! direct tier changes.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    ChangeSubscriptionCommand, ChangeSubscriptionHandler, CreateOrderCommand, CreateOrderHandler,
    VerifyPaymentCommand, VerifyPaymentHandler,
};
use crate::application::handlers::plans::{
    CreatePlanCommand, CreatePlanHandler, DeletePlanCommand, DeletePlanHandler, GetPlanHandler,
    GetPlanQuery, ListPlansHandler, UpdatePlanCommand, UpdatePlanHandler,
};
use crate::domain::access::Tier;
use crate::domain::billing::{BillingError, PlanUpdate, SignatureVerifier};
use crate::domain::foundation::UserId;
use crate::ports::{PaymentGateway, PaymentRepository, PlanRepository, UserRepository};

use super::super::error::ErrorResponse;
use super::super::identity::AuthenticatedUser;
use super::dto::{
    ChangeSubscriptionRequest, CreateOrderRequest, CreateOrderResponse, CreatePlanRequest,
    PlanResponse, SubscriberResponse, UpdatePlanRequest, VerifyPaymentRequest,
    VerifyPaymentResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for subscription endpoints.
#[derive(Clone)]
pub struct SubscriptionsAppState {
    pub users: Arc<dyn UserRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub verifier: Arc<SignatureVerifier>,
}

impl SubscriptionsAppState {
    pub fn list_plans_handler(&self) -> ListPlansHandler {
        ListPlansHandler::new(self.plans.clone())
    }

    pub fn get_plan_handler(&self) -> GetPlanHandler {
        GetPlanHandler::new(self.plans.clone())
    }

    pub fn create_plan_handler(&self) -> CreatePlanHandler {
        CreatePlanHandler::new(self.plans.clone())
    }

    pub fn update_plan_handler(&self) -> UpdatePlanHandler {
        UpdatePlanHandler::new(self.plans.clone())
    }

    pub fn delete_plan_handler(&self) -> DeletePlanHandler {
        DeletePlanHandler::new(self.plans.clone(), self.users.clone())
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.plans.clone(), self.gateway.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.users.clone(),
            self.plans.clone(),
            self.payments.clone(),
            self.gateway.clone(),
            self.verifier.clone(),
        )
    }

    pub fn change_subscription_handler(&self) -> ChangeSubscriptionHandler {
        ChangeSubscriptionHandler::new(self.users.clone(), self.plans.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Plan Registry Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/subscriptions - List all plans (public)
pub async fn list_plans(
    State(state): State<SubscriptionsAppState>,
) -> Result<impl IntoResponse, BillingApiError> {
    let plans = state.list_plans_handler().handle().await?;
    let response: Vec<PlanResponse> = plans.into_iter().map(PlanResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/subscriptions/:name - Read one plan by name (public)
pub async fn get_plan(
    State(state): State<SubscriptionsAppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, BillingApiError> {
    let name = parse_plan_name(&name)?;

    let plan = state.get_plan_handler().handle(GetPlanQuery { name }).await?;
    Ok(Json(PlanResponse::from(plan)))
}

/// POST /api/subscriptions - Create a plan (admin only)
pub async fn create_plan(
    State(state): State<SubscriptionsAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreatePlanRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let plan = state
        .create_plan_handler()
        .handle(CreatePlanCommand {
            requester_role: user.role,
            name: request.name,
            price: request.price,
            description: request.description,
            features: request.features,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PlanResponse::from(plan))))
}

/// PUT /api/subscriptions/:name - Update a plan (admin only)
pub async fn update_plan(
    State(state): State<SubscriptionsAppState>,
    user: AuthenticatedUser,
    Path(name): Path<String>,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let name = parse_plan_name(&name)?;

    let plan = state
        .update_plan_handler()
        .handle(UpdatePlanCommand {
            requester_role: user.role,
            name,
            update: PlanUpdate {
                price: request.price,
                description: request.description,
                features: request.features,
            },
        })
        .await?;

    Ok(Json(PlanResponse::from(plan)))
}

/// DELETE /api/subscriptions/:name - Delete a plan (admin only)
pub async fn delete_plan(
    State(state): State<SubscriptionsAppState>,
    user: AuthenticatedUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, BillingApiError> {
    let name = parse_plan_name(&name)?;

    state
        .delete_plan_handler()
        .handle(DeletePlanCommand {
            requester_role: user.role,
            name,
        })
        .await?;

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Payment Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/subscriptions/create-order - Open a gateway order
pub async fn create_order(
    State(state): State<SubscriptionsAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let result = state
        .create_order_handler()
        .handle(CreateOrderCommand {
            requester_id: user.user_id,
            plan_name: request.plan,
            currency: request.currency,
        })
        .await?;

    Ok(Json(CreateOrderResponse::from(result)))
}

/// POST /api/subscriptions/verify-payment - Verify a payment confirmation
/// and upgrade the paying user's tier
pub async fn verify_payment(
    State(state): State<SubscriptionsAppState>,
    user: AuthenticatedUser,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let result = state
        .verify_payment_handler()
        .handle(VerifyPaymentCommand {
            requester_id: user.user_id,
            order_id: request.order_id,
            payment_id: request.payment_id,
            signature: request.signature,
            plan_name: request.plan,
        })
        .await?;

    Ok(Json(VerifyPaymentResponse::from(result)))
}

/// PUT /api/subscriptions/user/:id - Set a user's subscription directly
/// (self or admin)
pub async fn change_subscription(
    State(state): State<SubscriptionsAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<ChangeSubscriptionRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let target_user_id = id
        .parse::<UserId>()
        .map_err(|_| BillingApiError(BillingError::validation("id", "Malformed user id")))?;

    let updated = state
        .change_subscription_handler()
        .handle(ChangeSubscriptionCommand {
            requester_id: user.user_id,
            requester_role: user.role,
            target_user_id,
            plan_name: request.plan,
        })
        .await?;

    Ok(Json(SubscriberResponse::from(updated)))
}

/// An unknown plan name cannot resolve to any plan: not found, matching
/// the lookup of a known name that was never registered.
fn parse_plan_name(raw: &str) -> Result<Tier, BillingApiError> {
    raw.parse::<Tier>()
        .map_err(|_| BillingApiError(BillingError::plan_not_found(raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts billing errors to HTTP responses.
pub struct BillingApiError(BillingError);

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            BillingError::PlanNotFound(_) => StatusCode::NOT_FOUND,
            BillingError::UserNotFound(_) => StatusCode::NOT_FOUND,
            BillingError::DuplicatePlan(_) => StatusCode::BAD_REQUEST,
            BillingError::PlanInUse { .. } => StatusCode::BAD_REQUEST,
            BillingError::VerificationFailed => StatusCode::BAD_REQUEST,
            BillingError::NotAuthorized => StatusCode::FORBIDDEN,
            BillingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            BillingError::Gateway(detail) => {
                tracing::error!(error = %detail, "payment gateway failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            BillingError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "subscription request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_plan_not_found_to_404() {
        let err = BillingApiError(BillingError::plan_not_found("premium"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_duplicate_plan_to_400() {
        let err = BillingApiError(BillingError::duplicate_plan(Tier::Basic));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_plan_in_use_to_400() {
        let err = BillingApiError(BillingError::plan_in_use(Tier::Basic, 2));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_verification_failed_to_400() {
        let err = BillingApiError(BillingError::verification_failed());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_not_authorized_to_403() {
        let err = BillingApiError(BillingError::not_authorized());
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn api_error_maps_gateway_to_500() {
        let err = BillingApiError(BillingError::gateway("timeout"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_plan_name_reads_as_not_found() {
        let err = parse_plan_name("platinum").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
