//! Simulated Loan Servicing
//!
//! Loan queries and the pay-now flow against the in-memory store. Payments
//! go through `Loan::record_payment`, so the same invariants hold here as
//! everywhere else; the service adds ownership scoping, the ledger entry,
//! and the payment notification.

use async_trait::async_trait;
use chrono::Utc;
use hana_config::ProductCatalog;
use hana_core::money::{format_usd, round_cents};
use hana_core::{
    Loan, LoanProduct, LoanStatus, Notification, NotificationKind, Transaction, TransactionKind,
};
use tracing::info;
use uuid::Uuid;

use super::SimulatedContext;
use crate::error::ServiceError;
use crate::traits::LoanService;

pub struct SimulatedLoanService {
    ctx: SimulatedContext,
    catalog: ProductCatalog,
}

impl SimulatedLoanService {
    pub(crate) fn new(ctx: SimulatedContext, catalog: ProductCatalog) -> Self {
        Self { ctx, catalog }
    }

    fn assert_owner(&self, user_id: &str, loan_id: &str) -> Result<(), ServiceError> {
        let owned = self
            .ctx
            .store
            .loan_owners
            .get(loan_id)
            .map_or(false, |entry| entry.value() == user_id);
        if owned {
            Ok(())
        } else {
            Err(ServiceError::not_found("loan", loan_id))
        }
    }
}

/// Receipt code in the style printed on branch payment slips.
fn payment_reference() -> String {
    format!(
        "TXN{}",
        Uuid::new_v4().simple().to_string()[..8].to_uppercase()
    )
}

#[async_trait]
impl LoanService for SimulatedLoanService {
    async fn list_loans(
        &self,
        user_id: &str,
        status: Option<LoanStatus>,
    ) -> Result<Vec<Loan>, ServiceError> {
        self.ctx.begin().await?;

        let mut loans: Vec<Loan> = self
            .ctx
            .store
            .loan_ids_for(user_id)
            .into_iter()
            .filter_map(|id| self.ctx.store.loans.get(&id).map(|entry| entry.value().clone()))
            .filter(|loan| status.map_or(true, |wanted| loan.status == wanted))
            .collect();
        loans.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(loans)
    }

    async fn loan_detail(&self, user_id: &str, loan_id: &str) -> Result<Loan, ServiceError> {
        self.ctx.begin().await?;

        self.assert_owner(user_id, loan_id)?;
        self.ctx
            .store
            .loans
            .get(loan_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ServiceError::not_found("loan", loan_id))
    }

    async fn pay_now(
        &self,
        user_id: &str,
        loan_id: &str,
        amount: f64,
    ) -> Result<Transaction, ServiceError> {
        self.ctx.begin().await?;

        self.assert_owner(user_id, loan_id)?;

        let (loan_name, completed) = {
            let mut entry = self
                .ctx
                .store
                .loans
                .get_mut(loan_id)
                .ok_or_else(|| ServiceError::not_found("loan", loan_id))?;
            entry.record_payment(amount)?;
            (entry.name.clone(), entry.status == LoanStatus::Completed)
        };

        let amount = round_cents(amount);
        let tx = Transaction {
            id: format!("txn-{}", Uuid::new_v4().simple()),
            date: Utc::now(),
            amount,
            kind: TransactionKind::Payment,
            description: format!("Loan payment - {loan_name}"),
            reference: payment_reference(),
            loan_id: Some(loan_id.to_string()),
        };
        self.ctx.store.add_transaction(user_id, tx.clone());

        let message = if completed {
            format!(
                "Your final payment of {} closed {}. Congratulations!",
                format_usd(amount),
                loan_name
            )
        } else {
            format!(
                "Your payment of {} was applied to {}.",
                format_usd(amount),
                loan_name
            )
        };
        self.ctx.store.add_notification(
            user_id,
            Notification {
                id: format!("not-{}", Uuid::new_v4().simple()),
                title: "Payment received".to_string(),
                message,
                date: Utc::now(),
                read: false,
                kind: NotificationKind::Payment,
            },
        );

        info!(loan_id, amount, completed, "payment recorded");
        Ok(tx)
    }

    async fn list_products(&self) -> Result<Vec<LoanProduct>, ServiceError> {
        self.ctx.begin().await?;
        Ok(self.catalog.products.clone())
    }
}
