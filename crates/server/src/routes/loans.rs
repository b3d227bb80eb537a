//! Loan Routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hana_core::{Loan, LoanProduct, LoanStatus, Transaction};
use hana_services::LoanService;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<LoanStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Loan>>, ApiError> {
    let loans = state.backend.loans.list_loans(&user.id, query.status).await?;
    Ok(Json(loans))
}

pub async fn detail(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(loan_id): Path<String>,
) -> Result<Json<Loan>, ApiError> {
    let loan = state.backend.loans.loan_detail(&user.id, &loan_id).await?;
    Ok(Json(loan))
}

pub async fn pay(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(loan_id): Path<String>,
    Json(req): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let tx = state
        .backend
        .loans
        .pay_now(&user.id, &loan_id, req.amount)
        .await?;
    info!(
        user_id = %user.id,
        %loan_id,
        amount = req.amount,
        reference = %tx.reference,
        "payment recorded"
    );
    Ok((StatusCode::CREATED, Json(tx)))
}

/// The product catalog. Public so prospective members can browse rates.
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<LoanProduct>>, ApiError> {
    let products = state.backend.loans.list_products().await?;
    Ok(Json(products))
}
