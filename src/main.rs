//! BookVault server entry point.
//!
//! Composition root: loads configuration, builds the PostgreSQL pool and
//! the gateway client, wires the repositories into the routers, and
//! serves the API.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookvault::adapters::http::{api_router, CatalogAppState, SubscriptionsAppState, UsersAppState};
use bookvault::adapters::postgres::{
    PostgresBookRepository, PostgresPaymentRepository, PostgresPlanRepository,
    PostgresUserRepository,
};
use bookvault::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use bookvault::config::AppConfig;
use bookvault::domain::billing::SignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(&config.server.log_level)
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Repositories against the shared pool.
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let books = Arc::new(PostgresBookRepository::new(pool.clone()));
    let plans = Arc::new(PostgresPlanRepository::new(pool.clone()));
    let payments = Arc::new(PostgresPaymentRepository::new(pool));

    // Gateway client and signature verifier share the key secret,
    // injected here and nowhere else.
    let gateway = Arc::new(RazorpayGateway::new(RazorpayConfig::new(
        config.payment.razorpay_key_id.clone(),
        config.payment.razorpay_key_secret.clone(),
    )));
    let verifier = Arc::new(SignatureVerifier::new(
        config.payment.razorpay_key_secret.clone(),
    ));

    let app = api_router(
        CatalogAppState {
            users: users.clone(),
            books,
        },
        SubscriptionsAppState {
            users: users.clone(),
            plans,
            payments,
            gateway,
            verifier,
        },
        UsersAppState { users },
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )))
    .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "bookvault listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
