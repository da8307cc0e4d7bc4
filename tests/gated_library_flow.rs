//! End-to-end tests for the gated library flow.
//!
//! Drives the real API router with in-memory adapters and the mock
//! gateway: seed plans, register a free reader and a premium book, watch
//! the 403, run a verified payment, watch the 200.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookvault::adapters::http::{
    api_router, CatalogAppState, SubscriptionsAppState, UsersAppState,
};
use bookvault::adapters::memory::{
    InMemoryBookRepository, InMemoryPaymentRepository, InMemoryPlanRepository,
    InMemoryUserRepository,
};
use bookvault::adapters::razorpay::MockGateway;
use bookvault::domain::access::{Role, Tier};
use bookvault::domain::billing::{compute_signature_for_tests, Plan, SignatureVerifier};
use bookvault::domain::users::User;

const KEY_SECRET: &str = "rzp_test_key_secret_e2e";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    gateway: Arc<MockGateway>,
    payments: Arc<InMemoryPaymentRepository>,
    reader: User,
    admin: User,
}

fn seed_plans() -> Vec<Plan> {
    vec![
        Plan::new(Tier::Free, 0.0, "Free access to limited books", vec![]).unwrap(),
        Plan::new(Tier::Basic, 9.99, "Access to most books", vec![]).unwrap(),
        Plan::new(Tier::Premium, 19.99, "Full access to all books", vec![]).unwrap(),
    ]
}

fn test_app() -> TestApp {
    let reader = User::register("reader", "reader@example.com").unwrap();
    let mut admin = User::register("admin", "admin@example.com").unwrap();
    admin.change_role(Role::Admin);
    admin.change_tier(Tier::Premium);

    let users = Arc::new(InMemoryUserRepository::with_users(vec![
        reader.clone(),
        admin.clone(),
    ]));
    let books = Arc::new(InMemoryBookRepository::new());
    let plans = Arc::new(InMemoryPlanRepository::with_plans(seed_plans()));
    let payments = Arc::new(InMemoryPaymentRepository::new());
    let gateway = Arc::new(MockGateway::new());
    let verifier = Arc::new(SignatureVerifier::new(Secret::new(KEY_SECRET.to_string())));

    let router = api_router(
        CatalogAppState {
            users: users.clone(),
            books,
        },
        SubscriptionsAppState {
            users: users.clone(),
            plans,
            payments: payments.clone(),
            gateway: gateway.clone(),
            verifier,
        },
        UsersAppState { users },
    );

    TestApp {
        router,
        gateway,
        payments,
        reader,
        admin,
    }
}

fn request(method: Method, uri: &str, user: Option<&User>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder
            .header("X-User-Id", user.id.to_string())
            .header("X-User-Role", user.role.as_str());
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn create_premium_book(app: &TestApp) -> String {
    let (status, body) = send(
        &app.router,
        request(
            Method::POST,
            "/api/books",
            Some(&app.admin),
            Some(json!({
                "title": "Deep Archives",
                "author": "A. Librarian",
                "description": "Only for premium readers",
                "access_level": "premium"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// The upgrade journey
// =============================================================================

#[tokio::test]
async fn free_reader_upgrades_to_premium_through_verified_payment() {
    let app = test_app();
    let book_id = create_premium_book(&app).await;
    let book_uri = format!("/api/books/{}", book_id);

    // Free reader is turned away without the book body.
    let (status, body) = send(
        &app.router,
        request(Method::GET, &book_uri, Some(&app.reader), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.get("title").is_none());
    assert_eq!(body["code"], "UPGRADE_REQUIRED");

    // Open an order for the premium plan; amount derives from the plan.
    let (status, order) = send(
        &app.router,
        request(
            Method::POST,
            "/api/subscriptions/create-order",
            Some(&app.reader),
            Some(json!({"plan": "premium"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["amount"], 1999);
    assert_eq!(order["subscription_name"], "premium");
    let order_id = order["order_id"].as_str().unwrap().to_string();

    // The gateway captures the payment out of band.
    app.gateway.register_payment("pay_e2e_1", 1999, "INR");
    let signature = compute_signature_for_tests(KEY_SECRET, &order_id, "pay_e2e_1");

    let (status, verified) = send(
        &app.router,
        request(
            Method::POST,
            "/api/subscriptions/verify-payment",
            Some(&app.reader),
            Some(json!({
                "order_id": order_id,
                "payment_id": "pay_e2e_1",
                "signature": signature,
                "plan": "premium"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["success"], true);
    assert_eq!(verified["subscription"], "premium");
    assert_eq!(verified["payment"]["amount"], 19.99);

    // The very next read succeeds.
    let (status, body) = send(
        &app.router,
        request(Method::GET, &book_uri, Some(&app.reader), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Deep Archives");
}

#[tokio::test]
async fn forged_signature_grants_nothing() {
    let app = test_app();
    let book_id = create_premium_book(&app).await;

    app.gateway.register_payment("pay_forged", 1999, "INR");

    let (status, body) = send(
        &app.router,
        request(
            Method::POST,
            "/api/subscriptions/verify-payment",
            Some(&app.reader),
            Some(json!({
                "order_id": "order_x",
                "payment_id": "pay_forged",
                "signature": "f".repeat(64),
                "plan": "premium"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PAYMENT_VERIFICATION_FAILED");
    assert!(app.payments.snapshot().is_empty());

    // Still gated.
    let (status, _) = send(
        &app.router,
        request(
            Method::GET,
            &format!("/api/books/{}", book_id),
            Some(&app.reader),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn repeated_verification_callback_stays_single_capture() {
    let app = test_app();

    app.gateway.register_payment("pay_dup", 1999, "INR");
    let signature = compute_signature_for_tests(KEY_SECRET, "order_dup", "pay_dup");
    let body = json!({
        "order_id": "order_dup",
        "payment_id": "pay_dup",
        "signature": signature,
        "plan": "premium"
    });

    for _ in 0..2 {
        let (status, response) = send(
            &app.router,
            request(
                Method::POST,
                "/api/subscriptions/verify-payment",
                Some(&app.reader),
                Some(body.clone()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["subscription"], "premium");
    }

    assert_eq!(app.payments.snapshot().len(), 1);
}

// =============================================================================
// Listing and catalog gating
// =============================================================================

#[tokio::test]
async fn listing_is_filtered_by_stored_tier() {
    let app = test_app();

    for (title, level) in [
        ("Open Book", "free"),
        ("Member Book", "basic"),
        ("Inner Circle", "premium"),
    ] {
        let (status, _) = send(
            &app.router,
            request(
                Method::POST,
                "/api/books",
                Some(&app.admin),
                Some(json!({
                    "title": title,
                    "author": "A",
                    "description": "D",
                    "access_level": level
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app.router,
        request(Method::GET, "/api/books", Some(&app.reader), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Open Book"]);

    let (_, admin_view) = send(
        &app.router,
        request(Method::GET, "/api/books", Some(&app.admin), None),
    )
    .await;
    assert_eq!(admin_view.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn missing_book_and_gated_book_are_distinct() {
    let app = test_app();
    let book_id = create_premium_book(&app).await;

    let (missing_status, _) = send(
        &app.router,
        request(
            Method::GET,
            "/api/books/00000000-0000-0000-0000-000000000000",
            Some(&app.reader),
            None,
        ),
    )
    .await;
    assert_eq!(missing_status, StatusCode::NOT_FOUND);

    let (gated_status, _) = send(
        &app.router,
        request(
            Method::GET,
            &format!("/api/books/{}", book_id),
            Some(&app.reader),
            None,
        ),
    )
    .await;
    assert_eq!(gated_status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn non_admin_cannot_touch_the_catalog() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        request(
            Method::POST,
            "/api/books",
            Some(&app.reader),
            Some(json!({
                "title": "Sneaky",
                "author": "A",
                "description": "D",
                "access_level": "free"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    let app = test_app();

    let (status, _) = send(&app.router, request(Method::GET, "/api/books", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Plan registry invariants over HTTP
// =============================================================================

#[tokio::test]
async fn duplicate_plan_create_is_rejected() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        request(
            Method::POST,
            "/api/subscriptions",
            Some(&app.admin),
            Some(json!({
                "name": "basic",
                "price": 12.99,
                "description": "Second basic"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PLAN_EXISTS");
}

#[tokio::test]
async fn plan_in_use_cannot_be_deleted() {
    let app = test_app();

    // Every seeded user is on the free plan.
    let (status, body) = send(
        &app.router,
        request(
            Method::DELETE,
            "/api/subscriptions/free",
            Some(&app.admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PLAN_IN_USE");

    // Nobody references basic; it goes away.
    let (status, _) = send(
        &app.router,
        request(
            Method::DELETE,
            "/api/subscriptions/basic",
            Some(&app.admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn plans_are_publicly_readable() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        request(Method::GET, "/api/subscriptions", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, plan) = send(
        &app.router,
        request(Method::GET, "/api/subscriptions/premium", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["price"], 19.99);
}

// =============================================================================
// User roster authorization
// =============================================================================

#[tokio::test]
async fn self_edit_succeeds_but_self_promotion_fails() {
    let app = test_app();
    let uri = format!("/api/users/{}", app.reader.id);

    let (status, body) = send(
        &app.router,
        request(
            Method::PUT,
            &uri,
            Some(&app.reader),
            Some(json!({"username": "renamed_reader"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "renamed_reader");

    let (status, body) = send(
        &app.router,
        request(
            Method::PUT,
            &uri,
            Some(&app.reader),
            Some(json!({"role": "admin"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["msg"], "Not authorized to change role");
}

#[tokio::test]
async fn stranger_cannot_read_another_profile() {
    let app = test_app();

    // The reader asks for the admin's record.
    let (status, _) = send(
        &app.router,
        request(
            Method::GET,
            &format!("/api/users/{}", app.admin.id),
            Some(&app.reader),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn roster_listing_is_admin_only() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        request(Method::GET, "/api/users", Some(&app.reader), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app.router,
        request(Method::GET, "/api/users", Some(&app.admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn direct_tier_change_is_self_or_admin() {
    let app = test_app();
    let uri = format!("/api/subscriptions/user/{}", app.reader.id);

    // Self-service downgrade/upgrade against an existing plan.
    let (status, body) = send(
        &app.router,
        request(
            Method::PUT,
            &uri,
            Some(&app.reader),
            Some(json!({"plan": "basic"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscription"], "basic");

    // A second registered user may not touch the reader's tier.
    let stranger = User::register("stranger", "stranger@example.com").unwrap();
    let (status, _) = send(
        &app.router,
        request(
            Method::PUT,
            &uri,
            Some(&stranger),
            Some(json!({"plan": "premium"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
