//! Login Screen

use std::sync::Arc;

use hana_services::AuthService;
use tracing::warn;

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// The sign-in form and its submission state.
pub struct LoginScreen {
    session: Arc<AppSession>,
    pub email: String,
    pub password: String,
    store: ScreenStore<()>,
}

impl LoginScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            email: String::new(),
            password: String::new(),
            store: ScreenStore::new(),
        }
    }

    /// Both fields filled in, the submit button gate.
    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn state(&self) -> LoadState<()> {
        self.store.state()
    }

    /// Exchange the form for a session. One submission at a time; a
    /// rejected login surfaces inline and is not retryable.
    pub async fn submit(&self) -> Result<(), ScreenError> {
        let guard = self.store.begin()?;

        let attempt = self
            .session
            .backend()
            .auth
            .login(self.email.trim(), &self.password)
            .await;

        match attempt {
            Ok(auth) => {
                self.session.establish(auth.token, auth.user);
                guard.succeed(());
                Ok(())
            }
            Err(error) => {
                warn!(%error, "login failed");
                guard.fail(error.clone());
                Err(ScreenError::Service(error))
            }
        }
    }
}
