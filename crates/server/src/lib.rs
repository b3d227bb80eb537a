//! Hana API Server
//!
//! REST surface for the mobile app: authentication, loans and payments,
//! savings, the transaction ledger, notifications, and public support
//! content. Handlers stay thin; everything of substance happens behind
//! the [`Backend`](hana_services::Backend) service handles in
//! [`AppState`], so the same routes serve the simulated backend today and
//! a persistent one later.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use hana_config::Settings;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use extract::AuthUser;
pub use state::AppState;

/// The application router with middleware attached.
pub fn router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/support", get(routes::support))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/password-reset", post(routes::auth::password_reset))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/me", get(routes::auth::me))
        .route("/api/loans", get(routes::loans::list))
        .route("/api/loans/:id", get(routes::loans::detail))
        .route("/api/loans/:id/payments", post(routes::loans::pay))
        .route("/api/products", get(routes::loans::products))
        .route("/api/savings/accounts", get(routes::savings::accounts))
        .route("/api/savings/goals", get(routes::savings::goals))
        .route("/api/transactions", get(routes::transactions::list))
        .route("/api/notifications", get(routes::notifications::list))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.request_timeout_secs,
        )))
        .with_state(state)
}

/// CORS policy from settings. An empty origin list opens the API to any
/// origin, which is what the demo deployments run with.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let list = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(list))
        .allow_methods(Any)
        .allow_headers(Any)
}
