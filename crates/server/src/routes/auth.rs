//! Authentication Routes

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use hana_core::validation::RegistrationForm;
use hana_core::User;
use hana_services::{AuthService, AuthSession};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::extract::{bearer_token, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = state.backend.auth.login(&req.email, &req.password).await?;
    info!(user_id = %session.user.id, "login");
    Ok(Json(session))
}

pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user_id = state.backend.auth.register(&form).await?;
    info!(%user_id, "member registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

pub async fn password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state.backend.auth.request_password_reset(&req.email).await?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "ok": true }))))
}

pub async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// Revoke the presented token. Answers 204 even when no token was sent,
/// so a client can always log out cleanly.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        state.backend.auth.logout(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
