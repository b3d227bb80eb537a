//! Simulated Savings
//!
//! Read-only views over the member's seeded savings accounts and goals.

use async_trait::async_trait;
use hana_core::{SavingsAccount, SavingsGoal};

use super::SimulatedContext;
use crate::error::ServiceError;
use crate::traits::SavingsService;

pub struct SimulatedSavingsService {
    ctx: SimulatedContext,
}

impl SimulatedSavingsService {
    pub(crate) fn new(ctx: SimulatedContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SavingsService for SimulatedSavingsService {
    async fn list_accounts(&self, user_id: &str) -> Result<Vec<SavingsAccount>, ServiceError> {
        self.ctx.begin().await?;

        Ok(self
            .ctx
            .store
            .savings
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>, ServiceError> {
        self.ctx.begin().await?;

        Ok(self
            .ctx
            .store
            .goals
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
