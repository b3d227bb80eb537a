//! Profile Screen
//!
//! The member's profile details, their notification feed, and the sign-out
//! action.

use std::sync::Arc;

use hana_core::{unread_count, Notification, User};
use hana_services::{AuthFailure, NotificationService, ServiceError};

use crate::screen::{LoadState, ScreenError, ScreenStore};
use crate::session::AppSession;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub user: User,
    /// Feed shown under the profile card, newest first.
    pub notifications: Vec<Notification>,
}

impl ProfileData {
    pub fn unread(&self) -> usize {
        unread_count(&self.notifications)
    }
}

pub struct ProfileScreen {
    session: Arc<AppSession>,
    store: ScreenStore<ProfileData>,
}

impl ProfileScreen {
    pub fn new(session: Arc<AppSession>) -> Self {
        Self {
            session,
            store: ScreenStore::new(),
        }
    }

    pub fn state(&self) -> LoadState<ProfileData> {
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

    /// Sign out. Always succeeds locally; token revocation is best effort.
    pub async fn logout(&self) {
        self.session.logout().await;
    }

    async fn fetch(&self) -> Result<ProfileData, ServiceError> {
        let user_id = self.session.require_user_id()?;
        let user = self
            .session
            .current_user()
            .ok_or(ServiceError::Auth(AuthFailure::NotAuthorized))?;
        let notifications = self
            .session
            .backend()
            .notifications
            .list_notifications(&user_id)
            .await?;

        Ok(ProfileData {
            user,
            notifications,
        })
    }
}
