//! In-Memory Data Store
//!
//! Shared state behind the simulated services: member records, sessions,
//! loans with an owner index, and per-member ledgers. `DashMap` gives
//! per-entry locking, so the services stay `Send + Sync` without a global
//! lock around the whole dataset.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use hana_core::{Loan, Notification, SavingsAccount, SavingsGoal, Transaction, User};

use crate::error::ServiceError;

/// A member profile plus the credential it authenticates with.
#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub user: User,
    pub password: String,
}

/// Everything the simulated backend knows, keyed for the access paths the
/// services need.
#[derive(Default)]
pub struct DataStore {
    /// user id -> member record.
    pub members: DashMap<String, MemberRecord>,
    /// lowercased email -> user id.
    pub emails: DashMap<String, String>,
    /// bearer token -> user id.
    pub tokens: DashMap<String, String>,
    /// loan id -> loan.
    pub loans: DashMap<String, Loan>,
    /// loan id -> owning user id.
    pub loan_owners: DashMap<String, String>,
    /// user id -> ledger entries, in insertion order.
    pub transactions: DashMap<String, Vec<Transaction>>,
    /// user id -> savings accounts.
    pub savings: DashMap<String, Vec<SavingsAccount>>,
    /// user id -> savings goals.
    pub goals: DashMap<String, Vec<SavingsGoal>>,
    /// user id -> notification feed.
    pub notifications: DashMap<String, Vec<Notification>>,
    /// Failure injection shared by every service.
    pub failures: FailureInjector,
}

impl DataStore {
    /// Insert a member and index the email.
    pub fn add_member(&self, record: MemberRecord) {
        self.emails
            .insert(record.user.email.to_lowercase(), record.user.id.clone());
        self.members.insert(record.user.id.clone(), record);
    }

    /// Insert a loan owned by `user_id`.
    pub fn add_loan(&self, user_id: &str, loan: Loan) {
        self.loan_owners.insert(loan.id.clone(), user_id.to_string());
        self.loans.insert(loan.id.clone(), loan);
    }

    /// Append a ledger entry to a member's transaction history.
    pub fn add_transaction(&self, user_id: &str, tx: Transaction) {
        self.transactions
            .entry(user_id.to_string())
            .or_default()
            .push(tx);
    }

    /// Append a notification to a member's feed.
    pub fn add_notification(&self, user_id: &str, notification: Notification) {
        self.notifications
            .entry(user_id.to_string())
            .or_default()
            .push(notification);
    }

    /// Ids of the loans owned by `user_id`.
    pub fn loan_ids_for(&self, user_id: &str) -> Vec<String> {
        self.loan_owners
            .iter()
            .filter(|entry| entry.value() == user_id)
            .map(|entry| entry.key().clone())
            .collect()
    }
}

/// Deterministic failure injection for exercising retry paths.
#[derive(Default)]
pub struct FailureInjector {
    remaining: AtomicU32,
}

impl FailureInjector {
    /// Make the next `n` operations fail with a retryable network error.
    pub fn fail_next(&self, n: u32) {
        self.remaining.store(n, Ordering::SeqCst);
    }

    /// Consume one pending failure, if any.
    pub fn check(&self) -> Result<(), ServiceError> {
        let armed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            Err(ServiceError::network("simulated network failure", true))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(id: &str, email: &str) -> MemberRecord {
        MemberRecord {
            user: User {
                id: id.to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: email.to_string(),
                phone_number: "0912345678".to_string(),
                profile_picture: None,
                address: None,
                occupation: None,
                id_number: None,
                join_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
            },
            password: "Password1!".to_string(),
        }
    }

    #[test]
    fn test_add_member_indexes_lowercased_email() {
        let store = DataStore::default();
        store.add_member(member("usr-1", "Jane.Doe@Example.com"));

        let hit = store.emails.get("jane.doe@example.com").unwrap();
        assert_eq!(hit.value(), "usr-1");
    }

    #[test]
    fn test_failure_injector_counts_down() {
        let injector = FailureInjector::default();
        assert!(injector.check().is_ok());

        injector.fail_next(2);
        assert!(injector.check().unwrap_err().is_retryable());
        assert!(injector.check().unwrap_err().is_retryable());
        assert!(injector.check().is_ok());
    }
}
