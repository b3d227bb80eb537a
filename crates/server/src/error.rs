//! API Errors
//!
//! One error type for every handler, mapping the service taxonomy onto
//! HTTP statuses and the wire envelope `{"error": {kind, message,
//! retryable, ...}}` the app's remote backend parses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hana_core::validation::FieldError;
use hana_services::{AuthFailure, ServiceError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Failure response for any API route.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ServiceError);

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: &'static str,
    message: String,
    retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Auth(AuthFailure::NotAuthorized) => StatusCode::FORBIDDEN,
            ServiceError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Network { .. } => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        let retryable = self.0.is_retryable();

        let (kind, fields, entity, id) = match self.0 {
            ServiceError::Auth(AuthFailure::InvalidCredentials) => {
                ("invalid_credentials", None, None, None)
            }
            ServiceError::Auth(AuthFailure::SessionExpired) => {
                ("session_expired", None, None, None)
            }
            ServiceError::Auth(AuthFailure::NotAuthorized) => ("not_authorized", None, None, None),
            ServiceError::Validation(fields) => ("validation", Some(fields), None, None),
            ServiceError::NotFound { entity, id } => ("not_found", None, Some(entity), Some(id)),
            ServiceError::Network { .. } => ("network", None, None, None),
            ServiceError::Internal(_) => ("internal", None, None, None),
        };

        if status.is_server_error() {
            error!(%status, kind, message, "request failed");
        } else {
            debug!(%status, kind, "request rejected");
        }

        let body = ErrorEnvelope {
            error: ErrorDetail {
                kind,
                message,
                retryable,
                fields,
                entity,
                id,
            },
        };
        (status, Json(body)).into_response()
    }
}
