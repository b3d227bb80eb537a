//! Transaction Routes

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use hana_core::{DateRange, Transaction};
use hana_services::TransactionService;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

/// Optional period filter. The range only applies when both ends are
/// given; a lone `from` or `to` is ignored rather than rejected.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PeriodQuery {
    fn range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)),
            _ => None,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .backend
        .transactions
        .list_transactions(&user.id, query.range())
        .await?;
    Ok(Json(transactions))
}
