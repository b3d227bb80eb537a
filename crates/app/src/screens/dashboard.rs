//! Dashboard Screen
//!
//! The home screen: greeting, loans in servicing, the portfolio summary
//! card, the product catalog carousel, and the notification bell badge.

use std::sync::Arc;

use hana_core::{unread_count, Loan, LoanProduct, PortfolioSummary};
use hana_services::{LoanService, NotificationService, ServiceError};

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// Time-of-day greeting, hour in 0-23.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Everything the home screen renders in one load.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Loans in servicing, shown as cards.
    pub active_loans: Vec<Loan>,
    pub summary: PortfolioSummary,
    pub products: Vec<LoanProduct>,
    /// Bell badge count.
    pub unread_notifications: usize,
}

pub struct DashboardScreen {
    session: Arc<AppSession>,
    store: ScreenStore<DashboardData>,
}

impl DashboardScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            store: ScreenStore::new(),
        }
    }

    /// Header line, e.g. "Good morning, Jane".
    pub fn greeting(&self, hour: u32) -> String {
        match self.session.current_user() {
            Some(user) => format!("{}, {}", greeting_for_hour(hour), user.first_name),
            None => greeting_for_hour(hour).to_string(),
        }
    }

    pub fn state(&self) -> LoadState<DashboardData> {
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

    /// Pull-to-refresh re-runs the full fetch.
    pub async fn refresh(&self) -> Result<(), ScreenError> {
        self.load().await
    }

    pub async fn retry(&self) -> Result<(), ScreenError> {
        self.load().await
    }

    async fn fetch(&self) -> Result<DashboardData, ServiceError> {
        let user_id = self.session.require_user_id()?;
        let backend = self.session.backend();

        let (loans, products, notifications) = tokio::try_join!(
            backend.loans.list_loans(&user_id, None),
            backend.loans.list_products(),
            backend.notifications.list_notifications(&user_id),
        )?;

        let summary = PortfolioSummary::from_loans(&loans);
        let active_loans = loans
            .into_iter()
            .filter(|loan| loan.status.is_payable())
            .collect();

        Ok(DashboardData {
            active_loans,
            summary,
            products,
            unread_notifications: unread_count(&notifications),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good afternoon");
        assert_eq!(greeting_for_hour(18), "Good evening");
        assert_eq!(greeting_for_hour(23), "Good evening");
    }
}
