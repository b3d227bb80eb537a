//! Demo Dataset
//!
//! The deterministic sample data the simulated backend starts with: one
//! member with a small loan portfolio, the matching ledger history, savings
//! accounts and goals, and a short notification feed. Loan balances are
//! derived from the amortization math, so every seeded record passes
//! `Loan::validate()`.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use hana_core::financial::{installment_amount, processing_fee};
use hana_core::money::{format_usd, round_cents};
use hana_core::progress::repayment_progress;
use hana_core::{
    Loan, LoanStatus, Notification, NotificationKind, PaymentFrequency, SavingsAccount,
    SavingsGoal, SavingsKind, Transaction, TransactionKind, User,
};

use super::store::{DataStore, MemberRecord};

/// Credentials of the demo member.
pub const DEMO_EMAIL: &str = "jane.doe@example.com";
pub const DEMO_PASSWORD: &str = "Password1!";
pub const DEMO_USER_ID: &str = "usr-1";

/// Seeded loan ids, in portfolio order.
pub const BUSINESS_LOAN_ID: &str = "loan-1";
pub const AGRICULTURE_LOAN_ID: &str = "loan-2";
pub const EDUCATION_LOAN_ID: &str = "loan-3";
pub const PENDING_LOAN_ID: &str = "loan-4";

/// Populate `store` with the demo dataset.
pub fn populate(store: &DataStore) {
    store.add_member(MemberRecord {
        user: User {
            id: DEMO_USER_ID.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: DEMO_EMAIL.to_string(),
            phone_number: "+95 9 123 456 789".to_string(),
            profile_picture: None,
            address: Some("No. 12, Inya Road, Kamayut Township, Yangon".to_string()),
            occupation: Some("Shop owner".to_string()),
            id_number: Some("12/KaMaYa(N)123456".to_string()),
            join_date: ymd(2023, 3, 15),
        },
        password: DEMO_PASSWORD.to_string(),
    });

    let mut ledger = SeedLedger { store, sequence: 0 };
    seed_business_loan(&mut ledger);
    seed_agriculture_loan(&mut ledger);
    seed_education_loan(&mut ledger);
    seed_pending_loan(store);
    seed_savings(store);
    seed_notifications(store);
}

/// Active business loan, five of twelve monthly installments paid.
fn seed_business_loan(ledger: &mut SeedLedger<'_>) {
    let start = ymd(2025, 2, 15);
    let installment = round_cents(installment_amount(
        5000.0,
        12.0,
        12,
        PaymentFrequency::Monthly,
    ));
    let total_paid = round_cents(installment * 5.0);
    let remaining = round_cents(installment * 12.0 - total_paid);

    ledger.store.add_loan(
        DEMO_USER_ID,
        Loan {
            id: BUSINESS_LOAN_ID.to_string(),
            name: "Business Loan".to_string(),
            amount: 5000.0,
            interest: 12.0,
            duration: 12,
            status: LoanStatus::Active,
            start_date: Some(start),
            end_date: Some(ymd(2026, 2, 15)),
            purpose: "Inventory purchase for the shop".to_string(),
            payment_frequency: PaymentFrequency::Monthly,
            next_payment_date: Some(start + Months::new(6)),
            next_payment_amount: Some(installment),
            total_paid,
            remaining_amount: remaining,
            progress: repayment_progress(total_paid, remaining),
        },
    );

    ledger.disburse(BUSINESS_LOAN_ID, "Business Loan", 5000.0, 2.0, start);
    for period in 1..=5 {
        ledger.pay(
            BUSINESS_LOAN_ID,
            "Business Loan",
            installment,
            start + Months::new(period),
        );
    }
}

/// Active agriculture loan on a biweekly cadence, four of thirteen
/// installments paid.
fn seed_agriculture_loan(ledger: &mut SeedLedger<'_>) {
    let start = ymd(2025, 5, 1);
    let periods = PaymentFrequency::Biweekly.periods_for_term(6);
    let installment = round_cents(installment_amount(
        1200.0,
        10.0,
        6,
        PaymentFrequency::Biweekly,
    ));
    let total_paid = round_cents(installment * 4.0);
    let remaining = round_cents(installment * periods as f64 - total_paid);

    ledger.store.add_loan(
        DEMO_USER_ID,
        Loan {
            id: AGRICULTURE_LOAN_ID.to_string(),
            name: "Agriculture Loan".to_string(),
            amount: 1200.0,
            interest: 10.0,
            duration: 6,
            status: LoanStatus::Active,
            start_date: Some(start),
            end_date: Some(ymd(2025, 11, 1)),
            purpose: "Seeds and fertilizer for the monsoon season".to_string(),
            payment_frequency: PaymentFrequency::Biweekly,
            next_payment_date: Some(start + Duration::days(14 * 5)),
            next_payment_amount: Some(installment),
            total_paid,
            remaining_amount: remaining,
            progress: repayment_progress(total_paid, remaining),
        },
    );

    ledger.disburse(AGRICULTURE_LOAN_ID, "Agriculture Loan", 1200.0, 2.0, start);
    for period in 1..=4 {
        ledger.pay(
            AGRICULTURE_LOAN_ID,
            "Agriculture Loan",
            installment,
            start + Duration::days(14 * period),
        );
    }
}

/// Education loan repaid in full last year.
fn seed_education_loan(ledger: &mut SeedLedger<'_>) {
    let start = ymd(2024, 3, 10);
    let installment = round_cents(installment_amount(
        2000.0,
        8.0,
        12,
        PaymentFrequency::Monthly,
    ));
    let total_paid = round_cents(installment * 12.0);

    ledger.store.add_loan(
        DEMO_USER_ID,
        Loan {
            id: EDUCATION_LOAN_ID.to_string(),
            name: "Education Loan".to_string(),
            amount: 2000.0,
            interest: 8.0,
            duration: 12,
            status: LoanStatus::Completed,
            start_date: Some(start),
            end_date: Some(ymd(2025, 3, 10)),
            purpose: "Accounting diploma tuition".to_string(),
            payment_frequency: PaymentFrequency::Monthly,
            next_payment_date: None,
            next_payment_amount: None,
            total_paid,
            remaining_amount: 0.0,
            progress: repayment_progress(total_paid, 0.0),
        },
    );

    ledger.disburse(EDUCATION_LOAN_ID, "Education Loan", 2000.0, 1.5, start);
    for period in 1..=12 {
        ledger.pay(
            EDUCATION_LOAN_ID,
            "Education Loan",
            installment,
            start + Months::new(period),
        );
    }
}

/// A second business application still under review.
fn seed_pending_loan(store: &DataStore) {
    store.add_loan(
        DEMO_USER_ID,
        Loan {
            id: PENDING_LOAN_ID.to_string(),
            name: "Business Loan".to_string(),
            amount: 10000.0,
            interest: 12.0,
            duration: 24,
            status: LoanStatus::Pending,
            start_date: None,
            end_date: None,
            purpose: "Opening a second shop location".to_string(),
            payment_frequency: PaymentFrequency::Monthly,
            next_payment_date: None,
            next_payment_amount: None,
            total_paid: 0.0,
            remaining_amount: 10000.0,
            progress: 0,
        },
    );
}

fn seed_savings(store: &DataStore) {
    store.savings.insert(
        DEMO_USER_ID.to_string(),
        vec![
            SavingsAccount {
                id: "sav-1".to_string(),
                name: "Regular Savings".to_string(),
                balance: 2500.0,
                interest_rate: 3.5,
                kind: SavingsKind::Regular {
                    last_transaction: ymd(2025, 7, 1),
                },
            },
            SavingsAccount {
                id: "sav-2".to_string(),
                name: "Fixed Deposit".to_string(),
                balance: 10000.0,
                interest_rate: 5.5,
                kind: SavingsKind::Fixed {
                    maturity_date: ymd(2026, 1, 1),
                },
            },
        ],
    );

    store.goals.insert(
        DEMO_USER_ID.to_string(),
        vec![
            SavingsGoal {
                id: "goal-1".to_string(),
                name: "Emergency Fund".to_string(),
                target: 5000.0,
                current: 3500.0,
                deadline: ymd(2025, 12, 31),
            },
            SavingsGoal {
                id: "goal-2".to_string(),
                name: "New Car".to_string(),
                target: 15000.0,
                current: 5000.0,
                deadline: ymd(2026, 6, 30),
            },
        ],
    );
}

fn seed_notifications(store: &DataStore) {
    let installment = round_cents(installment_amount(
        5000.0,
        12.0,
        12,
        PaymentFrequency::Monthly,
    ));

    let feed = vec![
        Notification {
            id: "not-1".to_string(),
            title: "Payment due soon".to_string(),
            message: format!(
                "Your Business Loan installment of {} is due on 15 August.",
                format_usd(installment)
            ),
            date: at_opening(ymd(2025, 8, 8)),
            read: false,
            kind: NotificationKind::Payment,
        },
        Notification {
            id: "not-2".to_string(),
            title: "Application received".to_string(),
            message: "We received your Business Loan application and will review it within 3-5 \
                      business days."
                .to_string(),
            date: at_opening(ymd(2025, 7, 28)),
            read: false,
            kind: NotificationKind::Loan,
        },
        Notification {
            id: "not-3".to_string(),
            title: "Fixed deposit rate confirmed".to_string(),
            message: "The rate on your Fixed Deposit is confirmed at 5.5% for the current term."
                .to_string(),
            date: at_opening(ymd(2025, 7, 10)),
            read: true,
            kind: NotificationKind::Account,
        },
        Notification {
            id: "not-4".to_string(),
            title: "Welcome to Hana".to_string(),
            message: "Thanks for joining Hana Microfinance. Explore our loan products from the \
                      dashboard."
                .to_string(),
            date: at_opening(ymd(2023, 3, 15)),
            read: true,
            kind: NotificationKind::General,
        },
    ];
    store.notifications.insert(DEMO_USER_ID.to_string(), feed);
}

/// Writes the ledger entries behind the seeded loans, numbering the
/// references in order.
struct SeedLedger<'a> {
    store: &'a DataStore,
    sequence: u32,
}

impl SeedLedger<'_> {
    fn push(
        &mut self,
        loan_id: &str,
        kind: TransactionKind,
        amount: f64,
        description: String,
        date: NaiveDate,
    ) {
        self.sequence += 1;
        self.store.add_transaction(
            DEMO_USER_ID,
            Transaction {
                id: format!("txn-{:04}", self.sequence),
                date: at_opening(date),
                amount: round_cents(amount),
                kind,
                description,
                reference: format!("TXN{:08}", self.sequence),
                loan_id: Some(loan_id.to_string()),
            },
        );
    }

    fn disburse(
        &mut self,
        loan_id: &str,
        name: &str,
        principal: f64,
        fee_percent: f64,
        date: NaiveDate,
    ) {
        self.push(
            loan_id,
            TransactionKind::Disbursement,
            principal,
            format!("Loan disbursement - {name}"),
            date,
        );
        self.push(
            loan_id,
            TransactionKind::Fee,
            processing_fee(principal, fee_percent),
            format!("Processing fee - {name}"),
            date,
        );
    }

    fn pay(&mut self, loan_id: &str, name: &str, amount: f64, date: NaiveDate) {
        self.push(
            loan_id,
            TransactionKind::Payment,
            amount,
            format!("Loan payment - {name}"),
            date,
        );
    }
}

// Seed dates are fixed constants, checked at module test time.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Branch-opening timestamp for a ledger date.
fn at_opening(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(9, 30, 0).unwrap_or_default().and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_seeded_loan_validates() {
        let store = DataStore::default();
        populate(&store);

        assert_eq!(store.loans.len(), 4);
        for entry in store.loans.iter() {
            entry.value().validate().unwrap();
        }
    }

    #[test]
    fn test_seeded_ledger_reconciles_with_loan_totals() {
        let store = DataStore::default();
        populate(&store);

        let transactions = store.transactions.get(DEMO_USER_ID).unwrap();
        for loan_id in [BUSINESS_LOAN_ID, AGRICULTURE_LOAN_ID, EDUCATION_LOAN_ID] {
            let loan = store.loans.get(loan_id).unwrap();
            let paid: f64 = transactions
                .iter()
                .filter(|tx| {
                    tx.loan_id.as_deref() == Some(loan_id)
                        && tx.kind == TransactionKind::Payment
                })
                .map(|tx| tx.amount)
                .sum();
            assert!(
                (paid - loan.total_paid).abs() < 0.005,
                "ledger disagrees with {loan_id}: {paid} vs {}",
                loan.total_paid
            );
        }
    }

    #[test]
    fn test_seed_dates_are_valid() {
        let store = DataStore::default();
        populate(&store);

        let default = NaiveDate::default();
        for entry in store.loans.iter() {
            assert_ne!(entry.start_date, Some(default), "loan {}", entry.id);
        }
        let transactions = store.transactions.get(DEMO_USER_ID).unwrap();
        for tx in transactions.iter() {
            assert_ne!(tx.date.date_naive(), default, "transaction {}", tx.id);
        }
    }

    #[test]
    fn test_references_are_unique() {
        let store = DataStore::default();
        populate(&store);

        let transactions = store.transactions.get(DEMO_USER_ID).unwrap();
        let mut references: Vec<&str> =
            transactions.iter().map(|tx| tx.reference.as_str()).collect();
        references.sort_unstable();
        let before = references.len();
        references.dedup();
        assert_eq!(references.len(), before);
    }
}
