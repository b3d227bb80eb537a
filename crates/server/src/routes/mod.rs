//! Route Handlers

use axum::extract::State;
use axum::Json;
use hana_config::SupportContent;
use serde_json::{json, Value};

use crate::state::AppState;

pub mod auth;
pub mod loans;
pub mod notifications;
pub mod savings;
pub mod transactions;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Brand, FAQ, and contact content. Public so the help screen works
/// before login.
pub async fn support(State(state): State<AppState>) -> Json<SupportContent> {
    Json(state.support.clone())
}
