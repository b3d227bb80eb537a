//! Financial Calculation Utilities
//!
//! Amortization math for loan servicing. This is the single source of
//! truth for installment and interest calculations across the workspace;
//! the simulated backend uses it to keep seeded accounts consistent.

use crate::domain::PaymentFrequency;

/// Periodic installment using the standard amortization formula.
///
/// A = P × r × (1 + r)^n / [(1 + r)^n - 1]
///
/// Where:
/// - P = Principal loan amount
/// - r = Periodic interest rate (annual_rate / periods_per_year / 100)
/// - n = Number of installments over the term
///
/// # Arguments
/// * `principal` - Principal loan amount (must be positive)
/// * `annual_rate_percent` - Annual interest rate as percentage (e.g., 12.0 for 12%)
/// * `duration_months` - Loan term in months (must be positive)
/// * `frequency` - Repayment cadence
///
/// # Returns
/// Installment amount per period, or 0.0 if inputs are invalid
///
/// # Precision
/// Uses `powi(i32)` for the integer period count to maximize floating-point
/// precision.
pub fn installment_amount(
    principal: f64,
    annual_rate_percent: f64,
    duration_months: u32,
    frequency: PaymentFrequency,
) -> f64 {
    let periods = frequency.periods_for_term(duration_months);
    if periods == 0 || principal <= 0.0 {
        return 0.0;
    }

    let periodic_rate = annual_rate_percent / 100.0 / frequency.periods_per_year() as f64;

    // 0% or negative interest pays the principal down in equal parts.
    if periodic_rate <= 0.0 {
        return principal / periods as f64;
    }

    let factor = (1.0 + periodic_rate).powi(periods as i32);
    principal * periodic_rate * factor / (factor - 1.0)
}

/// Total amount repaid over the full term (principal + interest).
pub fn total_repayment(
    principal: f64,
    annual_rate_percent: f64,
    duration_months: u32,
    frequency: PaymentFrequency,
) -> f64 {
    let installment =
        installment_amount(principal, annual_rate_percent, duration_months, frequency);
    installment * frequency.periods_for_term(duration_months) as f64
}

/// Total interest paid over the full term.
pub fn total_interest(
    principal: f64,
    annual_rate_percent: f64,
    duration_months: u32,
    frequency: PaymentFrequency,
) -> f64 {
    total_repayment(principal, annual_rate_percent, duration_months, frequency) - principal
}

/// Upfront processing fee for a product, as an amount.
pub fn processing_fee(principal: f64, fee_percent: f64) -> f64 {
    if principal <= 0.0 || fee_percent <= 0.0 {
        return 0.0;
    }
    principal * fee_percent / 100.0
}
