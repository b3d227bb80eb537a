//! App Session
//!
//! The signed-in member's session: the backend handle every screen reaches
//! through, the current bearer token and user, and a broadcast channel that
//! carries login and logout transitions to whoever subscribes.

use std::sync::Arc;

use hana_core::User;
use hana_services::{AuthFailure, AuthService, Backend, ServiceError};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Session lifecycle events, broadcast to every subscriber.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoggedIn { user: User },
    LoggedOut,
    SessionExpired,
}

#[derive(Debug, Clone)]
struct AuthState {
    token: String,
    user: User,
}

/// Shared auth state for the whole app.
pub struct AppSession {
    backend: Backend,
    auth: RwLock<Option<AuthState>>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl AppSession {
    pub fn new(backend: Backend) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(16);
        Arc::new(Self {
            backend,
            auth: RwLock::new(None),
            event_tx,
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.read().is_some()
    }

    /// The signed-in member, if any.
    pub fn current_user(&self) -> Option<User> {
        self.auth.read().as_ref().map(|auth| auth.user.clone())
    }

    /// The member id screens pass to the services, or an auth error when
    /// nobody is signed in.
    pub fn require_user_id(&self) -> Result<String, ServiceError> {
        self.auth
            .read()
            .as_ref()
            .map(|auth| auth.user.id.clone())
            .ok_or(ServiceError::Auth(AuthFailure::NotAuthorized))
    }

    /// Record a successful sign-in and notify subscribers.
    pub(crate) fn establish(&self, token: String, user: User) {
        info!(user_id = %user.id, "session established");
        *self.auth.write() = Some(AuthState {
            token,
            user: user.clone(),
        });
        let _ = self.event_tx.send(SessionEvent::LoggedIn { user });
    }

    /// End the session. The local state is cleared first so the app is
    /// signed out even when the revocation call cannot reach the backend.
    pub async fn logout(&self) {
        let auth = self.auth.write().take();
        let Some(auth) = auth else {
            return;
        };
        let _ = self.event_tx.send(SessionEvent::LoggedOut);

        if let Err(error) = self.backend.auth.logout(&auth.token).await {
            warn!(%error, "token revocation failed");
        }
    }

    /// Drop the session after the backend reported it expired. Idempotent,
    /// so concurrent screens can all report the same expiry.
    pub(crate) fn expire(&self) {
        if self.auth.write().take().is_some() {
            info!("session expired");
            let _ = self.event_tx.send(SessionEvent::SessionExpired);
        }
    }

    /// Screens call this on every failed fetch so an expired token tears
    /// the session down exactly once.
    pub(crate) fn note_failure(&self, error: &ServiceError) {
        if matches!(error, ServiceError::Auth(AuthFailure::SessionExpired)) {
            self.expire();
        }
    }
}
