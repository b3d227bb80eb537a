//! Simulated Notifications
//!
//! Reads over the member's notification feed, newest first.

use async_trait::async_trait;
use hana_core::Notification;

use super::SimulatedContext;
use crate::error::ServiceError;
use crate::traits::NotificationService;

pub struct SimulatedNotificationService {
    ctx: SimulatedContext,
}

impl SimulatedNotificationService {
    pub(crate) fn new(ctx: SimulatedContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl NotificationService for SimulatedNotificationService {
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>, ServiceError> {
        self.ctx.begin().await?;

        let mut feed: Vec<Notification> = self
            .ctx
            .store
            .notifications
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        feed.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(feed)
    }
}
