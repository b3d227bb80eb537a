//! Notification Routes

use axum::extract::State;
use axum::Json;
use hana_core::Notification;
use hana_services::NotificationService;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = state.backend.notifications.list_notifications(&user.id).await?;
    Ok(Json(notifications))
}
