//! Savings
//!
//! Savings accounts, goals, and the totals card on the savings screen.
//! Regular and fixed accounts share the balance fields and differ only in
//! the dates they track, so the variant-specific fields live in a tagged
//! enum flattened into the account record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::round_cents;
use crate::progress::percent_complete;

/// A member's savings account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccount {
    pub id: String,
    pub name: String,
    pub balance: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    #[serde(flatten)]
    pub kind: SavingsKind,
}

/// Account-kind specific fields, tagged as `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SavingsKind {
    #[serde(rename_all = "camelCase")]
    Regular { last_transaction: NaiveDate },
    #[serde(rename_all = "camelCase")]
    Fixed { maturity_date: NaiveDate },
}

/// A savings goal the member is working toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub current: f64,
    pub deadline: NaiveDate,
}

impl SavingsGoal {
    /// Percent of the target saved so far, 0-100.
    pub fn progress(&self) -> u8 {
        percent_complete(self.current, self.target)
    }
}

/// Rollup for the savings screen header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSummary {
    pub total_balance: f64,
    /// Best interest rate across the member's accounts, in percent.
    pub best_rate: f64,
}

impl SavingsSummary {
    pub fn from_accounts(accounts: &[SavingsAccount]) -> Self {
        let total_balance = accounts.iter().map(|a| a.balance).sum::<f64>();
        let best_rate = accounts
            .iter()
            .map(|a| a.interest_rate)
            .fold(0.0, f64::max);

        Self {
            total_balance: round_cents(total_balance),
            best_rate,
        }
    }
}
