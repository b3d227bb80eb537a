//! Domain Errors
//!
//! Violations of the domain model's invariants. Service-level concerns
//! (network, auth, not-found) live in the services crate; this covers only
//! what the records themselves can reject.

use thiserror::Error;

use crate::domain::LoanStatus;

/// Errors raised by domain validation and domain mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("unknown loan status '{0}'")]
    UnknownStatus(String),

    #[error("unknown payment frequency '{0}'")]
    UnknownFrequency(String),

    #[error("loan '{id}' is invalid: {reason}")]
    InvalidLoan { id: String, reason: String },

    #[error("product '{id}' is invalid: {reason}")]
    InvalidProduct { id: String, reason: String },

    #[error("loan '{loan_id}' cannot accept this payment: {reason}")]
    PaymentNotAllowed { loan_id: String, reason: String },

    #[error("loan status cannot move from {from} to {to}")]
    InvalidTransition { from: LoanStatus, to: LoanStatus },
}
