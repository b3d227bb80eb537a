//! Savings Screen
//!
//! Savings accounts and goals behind two tabs over a single load, with the
//! balance summary card on top.

use std::sync::Arc;

use hana_core::{SavingsAccount, SavingsGoal, SavingsSummary};
use hana_services::{SavingsService, ServiceError};

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// Tabs on the savings screen. Both render from the same load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsTab {
    Accounts,
    Goals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsData {
    pub accounts: Vec<SavingsAccount>,
    pub goals: Vec<SavingsGoal>,
    pub summary: SavingsSummary,
}

pub struct SavingsScreen {
    session: Arc<AppSession>,
    tab: SavingsTab,
    store: ScreenStore<SavingsData>,
}

impl SavingsScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            tab: SavingsTab::Accounts,
            store: ScreenStore::new(),
        }
    }

    pub fn tab(&self) -> SavingsTab {
        self.tab
    }

    /// Tab switches are local; the data is already loaded.
    pub fn select_tab(&mut self, tab: SavingsTab) {
        self.tab = tab;
    }

    pub fn state(&self) -> LoadState<SavingsData> {
        self.store.state()
    }

    pub async fn load(&self) -> Result<(), ScreenError> {
        let guard = self.store.begin()?;

        match self.fetch().await {
            Ok(data) => {
                guard.succeed(data);
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

    async fn fetch(&self) -> Result<SavingsData, ServiceError> {
        let user_id = self.session.require_user_id()?;
        let backend = self.session.backend();

        let (accounts, goals) = tokio::try_join!(
            backend.savings.list_accounts(&user_id),
            backend.savings.list_goals(&user_id),
        )?;

        let summary = SavingsSummary::from_accounts(&accounts);
        Ok(SavingsData {
            accounts,
            goals,
            summary,
        })
    }
}
