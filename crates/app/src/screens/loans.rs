//! Loans Screen
//!
//! The loan list with its active/completed tabs, and the repayment action
//! reached from a loan's detail view.

use std::sync::Arc;

use hana_core::{Loan, LoanStatus, Transaction};
use hana_services::{LoanService, ServiceError};
use tracing::info;

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// Tabs on the loans screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanTab {
    Active,
    Completed,
}

pub struct LoansScreen {
    session: Arc<AppSession>,
    tab: LoanTab,
    store: ScreenStore<Vec<Loan>>,
}

impl LoansScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            tab: LoanTab::Active,
            store: ScreenStore::new(),
        }
    }

    pub fn tab(&self) -> LoanTab {
        self.tab
    }

    pub fn state(&self) -> LoadState<Vec<Loan>> {
        self.store.state()
    }

    /// Switch tabs and refetch with the matching filter.
    pub async fn select_tab(&mut self, tab: LoanTab) -> Result<(), ScreenError> {
        self.tab = tab;
        self.load().await
    }

    pub async fn load(&self) -> Result<(), ScreenError> {
        let guard = self.store.begin()?;

        match self.fetch(self.tab).await {
            Ok(loans) => {
                guard.succeed(loans);
                Ok(())
            }
            Err(error) => {
                self.session.note_failure(&error);
                guard.fail(error.clone());
                Err(ScreenError::Service(error))
            }
        }
    }

    pub async fn retry(&self) -> Result<(), ScreenError> {
        self.load().await
    }

    /// Pay an installment, then refetch so the list shows the new balance.
    /// Returns the ledger entry for the receipt view.
    pub async fn pay_now(&self, loan_id: &str, amount: f64) -> Result<Transaction, ScreenError> {
        let guard = self.store.begin()?;

        let outcome: Result<(Transaction, Vec<Loan>), ServiceError> = async {
            let user_id = self.session.require_user_id()?;
            let tx = self
                .session
                .backend()
                .loans
                .pay_now(&user_id, loan_id, amount)
                .await?;
            info!(loan_id, reference = %tx.reference, "payment submitted");
            let loans = self.fetch(self.tab).await?;
            Ok((tx, loans))
        }
        .await;

        match outcome {
            Ok((tx, loans)) => {
                guard.succeed(loans);
                Ok(tx)
            }
            Err(error) => {
                self.session.note_failure(&error);
                guard.fail(error.clone());
                Err(ScreenError::Service(error))
            }
        }
    }

    async fn fetch(&self, tab: LoanTab) -> Result<Vec<Loan>, ServiceError> {
        let user_id = self.session.require_user_id()?;
        let backend = self.session.backend();

        match tab {
            // Overdue loans belong on the active tab.
            LoanTab::Active => {
                let loans = backend.loans.list_loans(&user_id, None).await?;
                Ok(loans
                    .into_iter()
                    .filter(|loan| loan.status.is_payable())
                    .collect())
            }
            LoanTab::Completed => {
                backend
                    .loans
                    .list_loans(&user_id, Some(LoanStatus::Completed))
                    .await
            }
        }
    }
}
