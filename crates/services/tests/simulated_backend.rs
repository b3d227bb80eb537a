//! End-to-end checks of the simulated backend through the service traits,
//! the same surface the app and the server consume.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use hana_config::ProductCatalog;
use hana_core::validation::RegistrationForm;
use hana_core::{DateRange, LoanStatus, SavingsSummary, TransactionKind};
use hana_services::{
    seed, AuthFailure, AuthService, Backend, DataStore, LoanService, NotificationService,
    SavingsService, ServiceError, SimulatedOptions, TransactionService,
};

fn backend() -> (Backend, Arc<DataStore>) {
    Backend::simulated_with_store(ProductCatalog::builtin(), SimulatedOptions::default())
}

#[tokio::test]
async fn test_login_and_authorize_round_trip() {
    let (backend, _) = backend();

    let session = backend
        .auth
        .login(seed::DEMO_EMAIL, seed::DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(session.user.first_name, "Jane");
    assert_eq!(session.user.id, seed::DEMO_USER_ID);

    let user = backend.auth.authorize(&session.token).await.unwrap();
    assert_eq!(user.id, session.user.id);

    backend.auth.logout(&session.token).await.unwrap();
    let err = backend.auth.authorize(&session.token).await.unwrap_err();
    assert_eq!(err, ServiceError::Auth(AuthFailure::SessionExpired));
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (backend, _) = backend();

    let err = backend
        .auth
        .login(seed::DEMO_EMAIL, "WrongPassword9!")
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Auth(AuthFailure::InvalidCredentials));
}

#[tokio::test]
async fn test_register_then_login() {
    let (backend, _) = backend();

    let form = RegistrationForm {
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        email: "maria.santos@example.com".to_string(),
        phone_number: "+95 9 987 654 321".to_string(),
        password: "Sunrise7$pass".to_string(),
    };
    let user_id = backend.auth.register(&form).await.unwrap();

    let session = backend
        .auth
        .login(&form.email, &form.password)
        .await
        .unwrap();
    assert_eq!(session.user.id, user_id);
    assert_eq!(session.user.full_name(), "Maria Santos");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (backend, _) = backend();

    let form = RegistrationForm {
        first_name: "Jane".to_string(),
        last_name: "Impostor".to_string(),
        email: seed::DEMO_EMAIL.to_string(),
        phone_number: "+95 9 111 222 333".to_string(),
        password: "Password1!".to_string(),
    };
    match backend.auth.register(&form).await.unwrap_err() {
        ServiceError::Validation(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "email");
        }
        other => panic!("expected validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_rejects_weak_form_with_all_failures() {
    let (backend, _) = backend();

    let form = RegistrationForm {
        first_name: String::new(),
        last_name: "Santos".to_string(),
        email: "not-an-email".to_string(),
        phone_number: "+95 9 987 654 321".to_string(),
        password: "short".to_string(),
    };
    match backend.auth.register(&form).await.unwrap_err() {
        ServiceError::Validation(fields) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
            assert!(names.contains(&"firstName"));
            assert!(names.contains(&"email"));
            assert!(names.contains(&"password"));
        }
        other => panic!("expected validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_password_reset_accepts_known_and_unknown_emails() {
    let (backend, _) = backend();

    backend
        .auth
        .request_password_reset(seed::DEMO_EMAIL)
        .await
        .unwrap();
    backend
        .auth
        .request_password_reset("nobody@example.com")
        .await
        .unwrap();

    let err = backend
        .auth
        .request_password_reset("not-an-email")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_seeded_loans_validate() {
    let (backend, _) = backend();

    let loans = backend
        .loans
        .list_loans(seed::DEMO_USER_ID, None)
        .await
        .unwrap();
    assert_eq!(loans.len(), 4);
    for loan in &loans {
        loan.validate().unwrap();
    }
}

#[tokio::test]
async fn test_list_loans_filters_by_status() {
    let (backend, _) = backend();

    let active = backend
        .loans
        .list_loans(seed::DEMO_USER_ID, Some(LoanStatus::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 2);

    let completed = backend
        .loans
        .list_loans(seed::DEMO_USER_ID, Some(LoanStatus::Completed))
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, seed::EDUCATION_LOAN_ID);

    let rejected = backend
        .loans
        .list_loans(seed::DEMO_USER_ID, Some(LoanStatus::Rejected))
        .await
        .unwrap();
    assert!(rejected.is_empty());
}

#[tokio::test]
async fn test_loan_detail_scopes_to_owner() {
    let (backend, _) = backend();

    let loan = backend
        .loans
        .loan_detail(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID)
        .await
        .unwrap();
    assert_eq!(loan.name, "Business Loan");

    let err = backend
        .loans
        .loan_detail("usr-2", seed::BUSINESS_LOAN_ID)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::NotFound {
            entity: "loan".to_string(),
            id: seed::BUSINESS_LOAN_ID.to_string(),
        }
    );
}

#[tokio::test]
async fn test_pay_now_records_payment_everywhere() {
    let (backend, _) = backend();

    let before = backend
        .loans
        .loan_detail(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID)
        .await
        .unwrap();
    let installment = before.next_payment_amount.unwrap();

    let tx = backend
        .loans
        .pay_now(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID, installment)
        .await
        .unwrap();
    assert_eq!(tx.kind, TransactionKind::Payment);
    assert!(tx.reference.starts_with("TXN"));
    assert_eq!(tx.loan_id.as_deref(), Some(seed::BUSINESS_LOAN_ID));

    let after = backend
        .loans
        .loan_detail(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID)
        .await
        .unwrap();
    assert!(after.remaining_amount < before.remaining_amount);
    assert!(after.total_paid > before.total_paid);
    after.validate().unwrap();

    let ledger = backend
        .transactions
        .list_transactions(seed::DEMO_USER_ID, None)
        .await
        .unwrap();
    assert!(ledger.iter().any(|t| t.id == tx.id));

    let feed = backend
        .notifications
        .list_notifications(seed::DEMO_USER_ID)
        .await
        .unwrap();
    assert!(feed.iter().any(|n| n.title == "Payment received"));
}

#[tokio::test]
async fn test_pay_now_completes_loan_at_zero_balance() {
    let (backend, _) = backend();

    let loan = backend
        .loans
        .loan_detail(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID)
        .await
        .unwrap();

    backend
        .loans
        .pay_now(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID, loan.remaining_amount)
        .await
        .unwrap();

    let paid_off = backend
        .loans
        .loan_detail(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID)
        .await
        .unwrap();
    assert_eq!(paid_off.status, LoanStatus::Completed);
    assert_eq!(paid_off.remaining_amount, 0.0);
    assert_eq!(paid_off.progress, 100);
    assert_eq!(paid_off.next_payment_date, None);
}

#[tokio::test]
async fn test_pay_now_rejects_overpayment() {
    let (backend, _) = backend();

    let loan = backend
        .loans
        .loan_detail(seed::DEMO_USER_ID, seed::BUSINESS_LOAN_ID)
        .await
        .unwrap();

    let err = backend
        .loans
        .pay_now(
            seed::DEMO_USER_ID,
            seed::BUSINESS_LOAN_ID,
            loan.remaining_amount + 1.0,
        )
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(fields) => assert_eq!(fields[0].field, "amount"),
        other => panic!("expected validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pay_now_rejects_pending_loan() {
    let (backend, _) = backend();

    let err = backend
        .loans
        .pay_now(seed::DEMO_USER_ID, seed::PENDING_LOAN_ID, 100.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_products_come_from_the_catalog() {
    let (backend, _) = backend();

    let products = backend.loans.list_products().await.unwrap();
    assert_eq!(products, ProductCatalog::builtin().products);
}

#[tokio::test]
async fn test_transactions_newest_first_with_range_filter() {
    let (backend, _) = backend();

    let all = backend
        .transactions
        .list_transactions(seed::DEMO_USER_ID, None)
        .await
        .unwrap();
    assert!(all.len() > 20);
    assert!(all.windows(2).all(|pair| pair[0].date >= pair[1].date));

    let may = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
    );
    let filtered = backend
        .transactions
        .list_transactions(seed::DEMO_USER_ID, Some(may))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 5);
    assert!(filtered.iter().all(|tx| may.contains(tx.date.date_naive())));
}

#[tokio::test]
async fn test_savings_accounts_and_goals() {
    let (backend, _) = backend();

    let accounts = backend
        .savings
        .list_accounts(seed::DEMO_USER_ID)
        .await
        .unwrap();
    let summary = SavingsSummary::from_accounts(&accounts);
    assert_eq!(summary.total_balance, 12500.0);
    assert_eq!(summary.best_rate, 5.5);

    let goals = backend.savings.list_goals(seed::DEMO_USER_ID).await.unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0].progress(), 70);
    assert_eq!(goals[1].progress(), 33);
}

#[tokio::test]
async fn test_notifications_newest_first() {
    let (backend, _) = backend();

    let feed = backend
        .notifications
        .list_notifications(seed::DEMO_USER_ID)
        .await
        .unwrap();
    assert_eq!(feed.len(), 4);
    assert!(feed.windows(2).all(|pair| pair[0].date >= pair[1].date));
    assert_eq!(hana_core::unread_count(&feed), 2);
}

#[tokio::test]
async fn test_fail_next_injects_retryable_errors() {
    let (backend, store) = backend();

    store.failures.fail_next(2);
    let err = backend
        .loans
        .list_loans(seed::DEMO_USER_ID, None)
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    let err = backend
        .savings
        .list_accounts(seed::DEMO_USER_ID)
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    assert!(backend
        .loans
        .list_loans(seed::DEMO_USER_ID, None)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_latency_option_delays_responses() {
    let (backend, _) = Backend::simulated_with_store(
        ProductCatalog::builtin(),
        SimulatedOptions::with_latency(Duration::from_millis(30)),
    );

    let started = Instant::now();
    backend
        .loans
        .list_loans(seed::DEMO_USER_ID, None)
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(30));
}
