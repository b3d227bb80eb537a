//! Service Interfaces
//!
//! The surface the app consumes, one trait per backend concern. The
//! simulated implementations live in this crate and the HTTP-backed ones in
//! the app crate; both sit behind the `Arc<dyn _>` handles bundled into
//! [`Backend`](crate::Backend).

use async_trait::async_trait;
use hana_core::validation::RegistrationForm;
use hana_core::{
    DateRange, Loan, LoanProduct, LoanStatus, Notification, SavingsAccount, SavingsGoal,
    Transaction, User,
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Session issued on successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    pub user: User,
}

/// Login, registration, and session lifecycle.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError>;

    /// Create a member account and return its id. The caller logs in
    /// separately.
    async fn register(&self, form: &RegistrationForm) -> Result<String, ServiceError>;

    /// Start a password reset for the given email. Succeeds without
    /// revealing whether an account exists.
    async fn request_password_reset(&self, email: &str) -> Result<(), ServiceError>;

    /// Resolve a bearer token to the member it belongs to.
    async fn authorize(&self, token: &str) -> Result<User, ServiceError>;

    /// Invalidate a session token. Logging out twice is not an error.
    async fn logout(&self, token: &str) -> Result<(), ServiceError>;
}

/// Loan accounts and the product catalog.
#[async_trait]
pub trait LoanService: Send + Sync {
    /// A member's loans, optionally filtered by status, in stable id order.
    async fn list_loans(
        &self,
        user_id: &str,
        status: Option<LoanStatus>,
    ) -> Result<Vec<Loan>, ServiceError>;

    /// A single loan, scoped to its owner. Another member's loan surfaces
    /// as not found.
    async fn loan_detail(&self, user_id: &str, loan_id: &str) -> Result<Loan, ServiceError>;

    /// Apply a repayment and return the resulting ledger entry.
    async fn pay_now(
        &self,
        user_id: &str,
        loan_id: &str,
        amount: f64,
    ) -> Result<Transaction, ServiceError>;

    /// The product catalog, as configured.
    async fn list_products(&self) -> Result<Vec<LoanProduct>, ServiceError>;
}

/// Savings accounts and goals.
#[async_trait]
pub trait SavingsService: Send + Sync {
    async fn list_accounts(&self, user_id: &str) -> Result<Vec<SavingsAccount>, ServiceError>;

    async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>, ServiceError>;
}

/// The member's transaction ledger.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Ledger entries newest first, optionally filtered to a date range.
    async fn list_transactions(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, ServiceError>;
}

/// The in-app notification feed.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Notifications newest first.
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>, ServiceError>;
}
