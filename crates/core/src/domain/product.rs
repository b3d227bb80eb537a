//! Loan Products
//!
//! The catalog entries a member can apply for. Product content ships in
//! configuration; this type carries the wire shape and its sanity checks.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A loan product offered by the institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub min_amount: f64,
    pub max_amount: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    /// Shortest term offered, in months.
    pub min_duration: u32,
    /// Longest term offered, in months.
    pub max_duration: u32,
    pub requirements: Vec<String>,
    /// Upfront fee in percent of the principal.
    pub processing_fee: f64,
    /// Human-readable turnaround, e.g. "3-5 business days".
    pub processing_time: String,
}

impl LoanProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        let fail = |reason: &str| {
            Err(DomainError::InvalidProduct {
                id: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        if self.min_amount <= 0.0 {
            return fail("minimum amount must be positive");
        }
        if self.min_amount > self.max_amount {
            return fail("minimum amount exceeds maximum amount");
        }
        if self.min_duration == 0 {
            return fail("minimum duration must be positive");
        }
        if self.min_duration > self.max_duration {
            return fail("minimum duration exceeds maximum duration");
        }
        if self.interest_rate < 0.0 {
            return fail("interest rate is negative");
        }
        if self.processing_fee < 0.0 {
            return fail("processing fee is negative");
        }
        Ok(())
    }
}
