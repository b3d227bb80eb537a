//! Simulated Backend
//!
//! In-memory implementations of every service trait, seeded with the demo
//! dataset. They behave like the real backend down to failure classes and
//! timing: operations can carry artificial latency, and the store's failure
//! injector forces retryable errors for retry-path tests.

mod auth;
mod loans;
mod notifications;
mod savings;
mod store;
mod transactions;

pub mod seed;

pub use auth::SimulatedAuthService;
pub use loans::SimulatedLoanService;
pub use notifications::SimulatedNotificationService;
pub use savings::SimulatedSavingsService;
pub use store::{DataStore, FailureInjector, MemberRecord};
pub use transactions::SimulatedTransactionService;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::error::ServiceError;

/// Behavior knobs for the simulated services.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedOptions {
    /// Artificial latency added to every operation, with a little jitter on
    /// top. Zero (the default) responds immediately.
    pub latency: Duration,
}

impl SimulatedOptions {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

/// Shared handle every simulated service operates through.
#[derive(Clone)]
pub(crate) struct SimulatedContext {
    pub store: Arc<DataStore>,
    pub options: SimulatedOptions,
}

impl SimulatedContext {
    /// Latency and failure injection, run at the top of every operation.
    pub async fn begin(&self) -> Result<(), ServiceError> {
        if !self.options.latency.is_zero() {
            let max_jitter = (self.options.latency.as_millis() as u64 / 4).max(1);
            let jitter = rand::thread_rng().gen_range(0..max_jitter);
            tokio::time::sleep(self.options.latency + Duration::from_millis(jitter)).await;
        }
        self.store.failures.check()
    }
}
