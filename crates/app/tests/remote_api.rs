//! RemoteBackend against a mocked REST API: status mapping, the bounded
//! retry, and the bearer token plumbing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use hana_app::screens::{DashboardScreen, LoginScreen};
use hana_app::{AppSession, RemoteBackend, RemoteConfig, ScreenError, SessionEvent};
use hana_core::validation::RegistrationForm;
use hana_core::{DateRange, Loan, LoanProduct, LoanStatus, PaymentFrequency, Transaction, User};
use hana_services::{
    AuthFailure, AuthService, LoanService, SavingsService, ServiceError, TransactionService,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_config(server: &MockServer) -> RemoteConfig {
    RemoteConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        retry_delay: Duration::from_millis(5),
    }
}

fn sample_user() -> User {
    User {
        id: "usr-1".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        phone_number: "+95 9 123 456 789".to_string(),
        profile_picture: None,
        address: Some("Yangon".to_string()),
        occupation: Some("Shop owner".to_string()),
        id_number: None,
        join_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
    }
}

fn sample_loan() -> Loan {
    Loan {
        id: "loan-1".to_string(),
        name: "Business Loan".to_string(),
        amount: 5000.0,
        interest: 12.0,
        duration: 12,
        status: LoanStatus::Active,
        start_date: NaiveDate::from_ymd_opt(2025, 2, 15),
        end_date: NaiveDate::from_ymd_opt(2026, 2, 15),
        purpose: "Inventory purchase".to_string(),
        payment_frequency: PaymentFrequency::Monthly,
        next_payment_date: NaiveDate::from_ymd_opt(2025, 9, 15),
        next_payment_amount: Some(444.24),
        total_paid: 2221.2,
        remaining_amount: 3109.68,
        progress: 42,
    }
}

fn login_body() -> serde_json::Value {
    json!({ "token": "tok-123", "user": sample_user() })
}

fn error_body(kind: &str, message: &str) -> serde_json::Value {
    json!({
        "error": { "kind": kind, "message": message, "retryable": false }
    })
}

#[tokio::test]
async fn test_login_stores_the_bearer_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/loans"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![sample_loan()]))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let auth = backend
        .auth
        .login("jane.doe@example.com", "Password1!")
        .await
        .unwrap();
    assert_eq!(auth.user.first_name, "Jane");

    let loans = backend.loans.list_loans("usr-1", None).await.unwrap();
    assert_eq!(loans, vec![sample_loan()]);
}

#[tokio::test]
async fn test_status_filter_becomes_a_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/loans"))
        .and(query_param("status", "completed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Loan>::new()))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let loans = backend
        .loans
        .list_loans("usr-1", Some(LoanStatus::Completed))
        .await
        .unwrap();
    assert!(loans.is_empty());
}

#[tokio::test]
async fn test_invalid_credentials_map_from_the_error_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_body("invalid_credentials", "invalid credentials")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let err = backend
        .auth
        .login("jane.doe@example.com", "nope")
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Auth(AuthFailure::InvalidCredentials));
}

#[tokio::test]
async fn test_get_retries_once_on_a_server_error() {
    let server = MockServer::start().await;
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(move |_: &Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_json(Vec::<LoanProduct>::new())
            }
        })
        .expect(2)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let products = backend.loans.list_products().await.unwrap();
    assert!(products.is_empty());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_retry_gives_up_after_the_second_failure() {
    let server = MockServer::start().await;
    // A bare 502 with no JSON body, as a proxy would answer.
    Mock::given(method("GET"))
        .and(path("/api/savings/accounts"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let err = backend.savings.list_accounts("usr-1").await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_a_payment_post_is_never_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/loans/loan-1/payments"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let err = backend
        .loans
        .pay_now("usr-1", "loan-1", 100.0)
        .await
        .unwrap_err();

    // The failure is still retryable, but only by an explicit user action.
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_validation_errors_carry_field_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {
                "kind": "validation",
                "message": "validation failed on 1 field(s)",
                "retryable": false,
                "fields": [
                    { "field": "email", "message": "An account with this email already exists" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let form = RegistrationForm {
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        email: "taken@example.com".to_string(),
        phone_number: "+95 9 777 888 999".to_string(),
        password: "Sunrise7$pass".to_string(),
    };
    let err = backend.auth.register(&form).await.unwrap_err();

    match err {
        ServiceError::Validation(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "email");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_round_trips_entity_and_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/loans/loan-9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "kind": "not_found",
                "message": "loan 'loan-9' not found",
                "retryable": false,
                "entity": "loan",
                "id": "loan-9"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let err = backend.loans.loan_detail("usr-1", "loan-9").await.unwrap_err();
    assert_eq!(err, ServiceError::not_found("loan", "loan-9"));
}

#[tokio::test]
async fn test_the_period_is_sent_as_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions"))
        .and(query_param("from", "2025-05-01"))
        .and(query_param("to", "2025-05-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Transaction>::new()))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
    );
    let transactions = backend
        .transactions
        .list_transactions("usr-1", Some(range))
        .await
        .unwrap();
    assert!(transactions.is_empty());
}

#[tokio::test]
async fn test_an_expired_session_reaches_subscribers_through_a_screen() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;
    for route in ["/api/loans", "/api/products", "/api/notifications"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(error_body("session_expired", "session expired")),
            )
            .mount(&server)
            .await;
    }

    let backend = RemoteBackend::connect(test_config(&server)).unwrap();
    let session = AppSession::new(backend);
    let mut login = LoginScreen::new(session.clone());
    login.email = "jane.doe@example.com".to_string();
    login.password = "Password1!".to_string();
    login.submit().await.unwrap();
    assert!(session.is_logged_in());

    let mut events = session.subscribe();
    let screen = DashboardScreen::new(session.clone());
    let err = screen.load().await.unwrap_err();

    assert_eq!(
        err,
        ScreenError::Service(ServiceError::Auth(AuthFailure::SessionExpired))
    );
    assert!(!session.is_logged_in());
    assert!(matches!(events.try_recv(), Ok(SessionEvent::SessionExpired)));
}
