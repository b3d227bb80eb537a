//! Loan Accounts
//!
//! The loan record, its status lifecycle, and portfolio-level rollups.
//! Status transitions are one-directional: a loan is originated as pending,
//! moves through approval into servicing, and ends at completed or
//! rejected. Overdue is the only state a loan can re-enter servicing from.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::money::round_cents;
use crate::progress::repayment_progress;

/// Lifecycle state of a loan. Wire form is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Active,
    Completed,
    Rejected,
    Overdue,
}

impl LoanStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [LoanStatus; 6] = [
        LoanStatus::Pending,
        LoanStatus::Approved,
        LoanStatus::Active,
        LoanStatus::Completed,
        LoanStatus::Rejected,
        LoanStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Overdue => "overdue",
        }
    }

    /// Check whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: LoanStatus) -> bool {
        use LoanStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Approved, Active)
                | (Active, Completed)
                | (Active, Overdue)
                | (Overdue, Active)
                | (Overdue, Completed)
        )
    }

    /// Completed and rejected loans never change status again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Whether the loan accepts repayments in this state.
    pub fn is_payable(self) -> bool {
        matches!(self, Self::Active | Self::Overdue)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "overdue" => Ok(Self::Overdue),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Repayment cadence for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::Biweekly => 26,
            Self::Monthly => 12,
        }
    }

    /// Number of installments over a term of `duration_months`.
    pub fn periods_for_term(self, duration_months: u32) -> u32 {
        (duration_months as f64 * self.periods_per_year() as f64 / 12.0).round() as u32
    }

    /// Next due date after `date` at this cadence.
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => date + Duration::days(7),
            Self::Biweekly => date + Duration::days(14),
            Self::Monthly => date + Months::new(1),
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(DomainError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A member's loan account.
///
/// `progress` is stored for wire compatibility with the app, but it is a
/// derived value: `validate` cross-checks it against the payment totals and
/// every servicing mutation recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub name: String,
    /// Principal amount disbursed.
    pub amount: f64,
    /// Annual interest rate in percent.
    pub interest: f64,
    /// Term in months.
    pub duration: u32,
    pub status: LoanStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub purpose: String,
    pub payment_frequency: PaymentFrequency,
    pub next_payment_date: Option<NaiveDate>,
    pub next_payment_amount: Option<f64>,
    pub total_paid: f64,
    pub remaining_amount: f64,
    /// Repayment progress, 0-100.
    pub progress: u8,
}

impl Loan {
    /// Progress recomputed from the payment totals.
    pub fn derived_progress(&self) -> u8 {
        repayment_progress(self.total_paid, self.remaining_amount)
    }

    /// Check the record's internal invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fail = |reason: &str| {
            Err(DomainError::InvalidLoan {
                id: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        if self.amount <= 0.0 {
            return fail("principal must be positive");
        }
        if self.interest < 0.0 {
            return fail("interest rate is negative");
        }
        if self.duration == 0 {
            return fail("duration must be positive");
        }
        if self.total_paid < 0.0 {
            return fail("total paid is negative");
        }
        if self.remaining_amount < 0.0 {
            return fail("remaining amount is negative");
        }
        if self.progress > 100 {
            return fail("progress exceeds 100");
        }
        if self.progress != self.derived_progress() {
            return fail("progress disagrees with payment totals");
        }
        Ok(())
    }

    /// Apply a repayment to the account.
    ///
    /// The loan must be in a payable state and the amount must be positive
    /// and no more than the remaining balance. Paying the balance down to
    /// zero completes the loan and clears the schedule; a payment on an
    /// overdue loan returns it to active servicing.
    pub fn record_payment(&mut self, amount: f64) -> Result<(), DomainError> {
        let reject = |reason: &str| {
            Err(DomainError::PaymentNotAllowed {
                loan_id: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        if !self.status.is_payable() {
            return reject("loan is not in a payable state");
        }
        if amount <= 0.0 {
            return reject("payment amount must be positive");
        }
        // Half-cent tolerance so an exact payoff never trips on float dust.
        if amount - self.remaining_amount > 0.005 {
            return reject("payment exceeds the remaining balance");
        }

        self.total_paid = round_cents(self.total_paid + amount);
        self.remaining_amount = round_cents((self.remaining_amount - amount).max(0.0));
        self.progress = self.derived_progress();

        if self.remaining_amount == 0.0 {
            self.status = LoanStatus::Completed;
            self.next_payment_date = None;
            self.next_payment_amount = None;
        } else {
            if self.status == LoanStatus::Overdue {
                self.status = LoanStatus::Active;
            }
            if let Some(due) = self.next_payment_date {
                self.next_payment_date = Some(self.payment_frequency.advance(due));
            }
        }

        Ok(())
    }
}

/// Rollup of a member's loans for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Balance still owed across loans in servicing.
    pub total_outstanding: f64,
    /// Loans currently in servicing (active or overdue).
    pub active_loans: usize,
    /// The earliest upcoming installment, if any.
    pub next_payment: Option<UpcomingPayment>,
}

/// The next installment due across the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPayment {
    pub loan_id: String,
    pub loan_name: String,
    pub due_date: NaiveDate,
    pub amount: f64,
}

impl PortfolioSummary {
    pub fn from_loans(loans: &[Loan]) -> Self {
        let mut total_outstanding = 0.0;
        let mut active_loans = 0;

        for loan in loans {
            match loan.status {
                LoanStatus::Active | LoanStatus::Overdue => {
                    total_outstanding += loan.remaining_amount;
                    active_loans += 1;
                }
                LoanStatus::Pending
                | LoanStatus::Approved
                | LoanStatus::Completed
                | LoanStatus::Rejected => {}
            }
        }

        let next_payment = loans
            .iter()
            .filter(|loan| loan.status.is_payable())
            .filter_map(|loan| match (loan.next_payment_date, loan.next_payment_amount) {
                (Some(due_date), Some(amount)) => Some(UpcomingPayment {
                    loan_id: loan.id.clone(),
                    loan_name: loan.name.clone(),
                    due_date,
                    amount,
                }),
                _ => None,
            })
            .min_by_key(|payment| payment.due_date);

        Self {
            total_outstanding: round_cents(total_outstanding),
            active_loans,
            next_payment,
        }
    }
}
