//! Savings Routes

use axum::extract::State;
use axum::Json;
use hana_core::{SavingsAccount, SavingsGoal};
use hana_services::SavingsService;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

pub async fn accounts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<SavingsAccount>>, ApiError> {
    let accounts = state.backend.savings.list_accounts(&user.id).await?;
    Ok(Json(accounts))
}

pub async fn goals(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<SavingsGoal>>, ApiError> {
    let goals = state.backend.savings.list_goals(&user.id).await?;
    Ok(Json(goals))
}
