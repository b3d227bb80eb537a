//! Screen State
//!
//! Every data screen renders from a [`LoadState`] held in a [`ScreenStore`].
//! The store enforces the single-pending-request contract: a screen claims
//! the request slot with [`ScreenStore::begin`], runs its fetch, and resolves
//! the slot through the returned [`RequestGuard`]. A second `begin` while the
//! slot is claimed answers [`ScreenError::RequestInFlight`] instead of
//! racing two fetches against each other.

use hana_services::ServiceError;
use parking_lot::Mutex;
use thiserror::Error;

/// Where a screen's data load currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded(T),
    /// The last request failed. `retryable` drives the retry affordance.
    Failed {
        error: ServiceError,
        retryable: bool,
    },
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the screen should offer a retry button.
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Failed { retryable: true, .. })
    }
}

/// Errors surfaced by screen operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    /// A request is already in flight for this screen.
    #[error("a request is already in flight")]
    RequestInFlight,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Holds one screen's [`LoadState`] and its single request slot.
pub struct ScreenStore<T> {
    state: Mutex<LoadState<T>>,
}

impl<T> Default for ScreenStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScreenStore<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoadState::Idle),
        }
    }

    /// Claim the request slot and move to `Loading`.
    ///
    /// Fails with [`ScreenError::RequestInFlight`] while another request
    /// holds the slot.
    pub fn begin(&self) -> Result<RequestGuard<'_, T>, ScreenError> {
        let mut state = self.state.lock();
        if state.is_loading() {
            return Err(ScreenError::RequestInFlight);
        }
        *state = LoadState::Loading;
        Ok(RequestGuard {
            store: self,
            resolved: false,
        })
    }
}

impl<T: Clone> ScreenStore<T> {
    /// A snapshot of the current state.
    pub fn state(&self) -> LoadState<T> {
        self.state.lock().clone()
    }
}

/// Proof that the request slot is claimed. Resolving it releases the slot;
/// dropping it unresolved resets the screen to `Idle`.
pub struct RequestGuard<'a, T> {
    store: &'a ScreenStore<T>,
    resolved: bool,
}

impl<T> RequestGuard<'_, T> {
    /// Resolve the request with data.
    pub fn succeed(mut self, value: T) {
        *self.store.state.lock() = LoadState::Loaded(value);
        self.resolved = true;
    }

    /// Resolve the request with a failure. The retry affordance follows
    /// [`ServiceError::is_retryable`].
    pub fn fail(mut self, error: ServiceError) {
        let retryable = error.is_retryable();
        *self.store.state.lock() = LoadState::Failed { error, retryable };
        self.resolved = true;
    }
}

impl<T> Drop for RequestGuard<'_, T> {
    fn drop(&mut self) {
        if !self.resolved {
            // An abandoned request releases the slot.
            *self.store.state.lock() = LoadState::Idle;
        }
    }
}
