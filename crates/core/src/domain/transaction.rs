//! Transactions
//!
//! The append-only ledger of money movements on a member's account, plus
//! the grouping and totals the transactions screen derives from it.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::round_cents;

/// Kind of ledger entry. Wire form is lowercase under the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Payment,
    Disbursement,
    Fee,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Payment,
        TransactionKind::Disbursement,
        TransactionKind::Fee,
    ];
}

/// A single ledger entry. Amounts are stored as absolute values; the
/// direction of movement follows from the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub reference: String,
    pub loan_id: Option<String>,
}

/// Totals card at the top of the transactions screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    /// Money leaving the member: payments and fees.
    pub paid_out: f64,
    /// Money reaching the member: disbursements.
    pub received: f64,
}

impl TransactionTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut paid_out = 0.0;
        let mut received = 0.0;

        for tx in transactions {
            match tx.kind {
                TransactionKind::Payment | TransactionKind::Fee => paid_out += tx.amount,
                TransactionKind::Disbursement => received += tx.amount,
            }
        }

        Self {
            paid_out: round_cents(paid_out),
            received: round_cents(received),
        }
    }
}

/// One day's worth of ledger entries, for the grouped list view.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub transactions: Vec<Transaction>,
}

/// Group entries by calendar day, newest day first. Order within a day is
/// preserved from the input.
pub fn group_by_day(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for tx in transactions {
        let day = tx.date.date_naive();
        match groups.iter_mut().find(|g| g.day == day) {
            Some(group) => group.transactions.push(tx.clone()),
            None => groups.push(DayGroup {
                day,
                transactions: vec![tx.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| b.day.cmp(&a.day));
    groups
}

/// Inclusive date filter for the transactions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The screen's default period: today and the 29 days before it.
    pub fn last_30_days(today: NaiveDate) -> Self {
        Self {
            from: today - Duration::days(29),
            to: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: &str, day: u32, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2025, 7, day, 10, 30, 0).unwrap(),
            amount,
            kind,
            description: "Monthly payment".to_string(),
            reference: format!("TXN-{id}"),
            loan_id: Some("loan-1".to_string()),
        }
    }

    #[test]
    fn test_transaction_wire_shape() {
        let json = serde_json::to_value(tx("1", 15, TransactionKind::Payment, 250.0)).unwrap();
        assert_eq!(json["type"], "payment");
        assert_eq!(json["loanId"], "loan-1");
        assert_eq!(json["reference"], "TXN-1");
    }

    #[test]
    fn test_totals() {
        let txs = vec![
            tx("1", 10, TransactionKind::Payment, 250.0),
            tx("2", 11, TransactionKind::Fee, 40.0),
            tx("3", 12, TransactionKind::Disbursement, 5000.0),
            tx("4", 13, TransactionKind::Payment, 250.0),
        ];
        let totals = TransactionTotals::from_transactions(&txs);
        assert_eq!(totals.paid_out, 540.0);
        assert_eq!(totals.received, 5000.0);
    }

    #[test]
    fn test_group_by_day_newest_first() {
        let txs = vec![
            tx("1", 10, TransactionKind::Payment, 250.0),
            tx("2", 12, TransactionKind::Fee, 40.0),
            tx("3", 10, TransactionKind::Payment, 100.0),
        ];
        let groups = group_by_day(&txs);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, NaiveDate::from_ymd_opt(2025, 7, 12).unwrap());
        assert_eq!(groups[1].day, NaiveDate::from_ymd_opt(2025, 7, 10).unwrap());

        let ids: Vec<&str> = groups[1].transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_date_range() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
        let range = DateRange::last_30_days(today);

        assert_eq!(range.from, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert!(range.contains(today));
        assert!(range.contains(range.from));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
    }
}
