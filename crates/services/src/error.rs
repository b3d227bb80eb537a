//! Service Errors
//!
//! The failure taxonomy every service operation returns. Callers branch on
//! the variant: validation errors render inline next to their fields, auth
//! failures send the member back to login, and only a retryable network
//! failure earns a retry affordance.

use std::fmt;

use hana_core::validation::FieldError;
use hana_core::DomainError;
use thiserror::Error;

/// Why an authentication step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// The email/password pair did not match a member account.
    InvalidCredentials,
    /// The session token is unknown or has been invalidated.
    SessionExpired,
    /// The session is valid but may not touch the requested resource.
    NotAuthorized,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidCredentials => "invalid credentials",
            Self::SessionExpired => "session expired",
            Self::NotAuthorized => "not authorized",
        };
        f.write_str(text)
    }
}

/// Failure classes shared by every service operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Transport-level failure between the app and the backend.
    #[error("network error: {message}")]
    Network { message: String, retryable: bool },

    /// The request was understood and refused, field by field.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("authentication failed: {0}")]
    Auth(AuthFailure),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Unexpected backend fault. Never retryable.
    #[error("internal service error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn network(message: impl Into<String>, retryable: bool) -> Self {
        Self::Network {
            message: message.into(),
            retryable,
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Whether retrying the same call can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { retryable: true, .. })
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PaymentNotAllowed { reason, .. } => Self::invalid_field("amount", reason),
            other => Self::Internal(other.to_string()),
        }
    }
}
