//! Forgot Password Screen

use std::sync::Arc;

use hana_services::AuthService;

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// The password reset request form. After a successful submission the
/// screen flips to its confirmation view.
pub struct ForgotPasswordScreen {
    session: Arc<AppSession>,
    pub email: String,
    submitted: bool,
    store: ScreenStore<()>,
}

impl ForgotPasswordScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            email: String::new(),
            submitted: false,
            store: ScreenStore::new(),
        }
    }

    /// Whether the confirmation view is showing.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn state(&self) -> LoadState<()> {
        self.store.state()
    }

    pub async fn submit(&mut self) -> Result<(), ScreenError> {
        let guard = self.store.begin()?;

        match self
            .session
            .backend()
            .auth
            .request_password_reset(self.email.trim())
            .await
        {
            Ok(()) => {
                self.submitted = true;
                guard.succeed(());
                Ok(())
            }
            Err(error) => {
                guard.fail(error.clone());
                Err(ScreenError::Service(error))
            }
        }
    }
}
