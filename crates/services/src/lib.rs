//! Hana Services
//!
//! Service interfaces for the member-facing product plus the simulated
//! backend used by the demo server and the test suites. Every operation is
//! async and returns [`ServiceError`], so callers branch on failure class
//! instead of matching message strings.

pub mod error;
pub mod simulated;
pub mod traits;

pub use error::{AuthFailure, ServiceError};
pub use simulated::{seed, DataStore, SimulatedOptions};
pub use traits::{
    AuthService, AuthSession, LoanService, NotificationService, SavingsService,
    TransactionService,
};

use std::sync::Arc;

use hana_config::ProductCatalog;

use simulated::{
    SimulatedAuthService, SimulatedContext, SimulatedLoanService, SimulatedNotificationService,
    SimulatedSavingsService, SimulatedTransactionService,
};

/// One handle per backend service, bundled so call sites take a single
/// dependency.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthService>,
    pub loans: Arc<dyn LoanService>,
    pub savings: Arc<dyn SavingsService>,
    pub transactions: Arc<dyn TransactionService>,
    pub notifications: Arc<dyn NotificationService>,
}

impl Backend {
    /// Fully simulated backend seeded with the demo dataset.
    pub fn simulated(catalog: ProductCatalog, options: SimulatedOptions) -> Self {
        Self::simulated_with_store(catalog, options).0
    }

    /// Same as [`Backend::simulated`], but hands back the store so tests
    /// can inspect state and arm failure injection.
    pub fn simulated_with_store(
        catalog: ProductCatalog,
        options: SimulatedOptions,
    ) -> (Self, Arc<DataStore>) {
        let store = Arc::new(DataStore::default());
        seed::populate(&store);

        let ctx = SimulatedContext {
            store: Arc::clone(&store),
            options,
        };
        let backend = Self {
            auth: Arc::new(SimulatedAuthService::new(ctx.clone())),
            loans: Arc::new(SimulatedLoanService::new(ctx.clone(), catalog)),
            savings: Arc::new(SimulatedSavingsService::new(ctx.clone())),
            transactions: Arc::new(SimulatedTransactionService::new(ctx.clone())),
            notifications: Arc::new(SimulatedNotificationService::new(ctx)),
        };
        (backend, store)
    }
}
