//! Simulated Transaction Ledger
//!
//! Reads over the per-member ledger, newest first, with the optional date
//! filter the transactions screen sends.

use async_trait::async_trait;
use hana_core::{DateRange, Transaction};

use super::SimulatedContext;
use crate::error::ServiceError;
use crate::traits::TransactionService;

pub struct SimulatedTransactionService {
    ctx: SimulatedContext,
}

impl SimulatedTransactionService {
    pub(crate) fn new(ctx: SimulatedContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl TransactionService for SimulatedTransactionService {
    async fn list_transactions(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, ServiceError> {
        self.ctx.begin().await?;

        let mut transactions: Vec<Transaction> = self
            .ctx
            .store
            .transactions
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        if let Some(range) = range {
            transactions.retain(|tx| range.contains(tx.date.date_naive()));
        }
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(transactions)
    }
}
