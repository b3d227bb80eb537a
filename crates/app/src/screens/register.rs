//! Registration Screen

use std::sync::Arc;

use hana_core::validation::{PasswordCriteria, RegistrationForm};
use hana_services::{AuthService, ServiceError};
use tracing::warn;

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

/// The signup form, its live password checklist, and the submission state.
pub struct RegisterScreen {
    session: Arc<AppSession>,
    pub form: RegistrationForm,
    store: ScreenStore<()>,
}

impl RegisterScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            form: RegistrationForm {
                first_name: String::new(),
                last_name: String::new(),
                email: String::new(),
                phone_number: String::new(),
                password: String::new(),
            },
            store: ScreenStore::new(),
        }
    }

    /// The password checklist for whatever is currently typed.
    pub fn criteria(&self) -> PasswordCriteria {
        PasswordCriteria::evaluate(&self.form.password)
    }

    /// Every field valid, the submit button gate.
    pub fn can_submit(&self) -> bool {
        self.form.validate().is_ok()
    }

    pub fn state(&self) -> LoadState<()> {
        self.store.state()
    }

    /// Create the account, then sign straight in with the new credentials.
    pub async fn submit(&self) -> Result<(), ScreenError> {
        let guard = self.store.begin()?;

        let outcome: Result<(), ServiceError> = async {
            let backend = self.session.backend();
            backend.auth.register(&self.form).await?;
            let session = backend
                .auth
                .login(self.form.email.trim(), &self.form.password)
                .await?;
            self.session.establish(session.token, session.user);
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {
                guard.succeed(());
                Ok(())
            }
            Err(error) => {
                warn!(%error, "registration failed");
                guard.fail(error.clone());
                Err(ScreenError::Service(error))
            }
        }
    }
}
