//! Transactions Screen
//!
//! The ledger view: entries grouped by day with the paid/received totals
//! card, over a selectable period that defaults to the last 30 days.

use std::sync::Arc;

use chrono::NaiveDate;
use hana_core::{group_by_day, DateRange, DayGroup, TransactionTotals};
use hana_services::TransactionService;

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// Rows and totals the screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsData {
    /// Entries grouped by calendar day, newest day first.
    pub groups: Vec<DayGroup>,
    pub totals: TransactionTotals,
}

pub struct TransactionsScreen {
    session: Arc<AppSession>,
    period: DateRange,
    store: ScreenStore<TransactionsData>,
}

impl TransactionsScreen {
    /// Opens on the last 30 days ending today.
    pub fn new(session: Arc<AppSession>, today: NaiveDate) -> Self {
        Self {
            session,
            period: DateRange::last_30_days(today),
            store: ScreenStore::new(),
        }
    }

    pub fn period(&self) -> DateRange {
        self.period
    }

    pub fn state(&self) -> LoadState<TransactionsData> {
        self.store.state()
    }

    /// Change the period and refetch.
    pub async fn set_period(&mut self, period: DateRange) -> Result<(), ScreenError> {
        self.period = period;
        self.load().await
    }

    pub async fn load(&self) -> Result<(), ScreenError> {
        let guard = self.store.begin()?;

        let user_id = match self.session.require_user_id() {
            Ok(id) => id,
            Err(error) => {
                guard.fail(error.clone());
                return Err(ScreenError::Service(error));
            }
        };

        let fetched = self
            .session
            .backend()
            .transactions
            .list_transactions(&user_id, Some(self.period))
            .await;

        match fetched {
            Ok(transactions) => {
                guard.succeed(TransactionsData {
                    totals: TransactionTotals::from_transactions(&transactions),
                    groups: group_by_day(&transactions),
                });
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
}
