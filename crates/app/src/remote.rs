//! Remote Backend
//!
//! HTTP implementations of the service traits against the REST API. The
//! server scopes every request to the member the bearer token names, so the
//! `user_id` arguments on the traits stay local and are never sent over the
//! wire. Failures map onto the service error taxonomy, and idempotent
//! requests get one bounded retry with jittered backoff before the error
//! reaches a screen.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hana_core::validation::{FieldError, RegistrationForm};
use hana_core::{
    DateRange, Loan, LoanProduct, LoanStatus, Notification, SavingsAccount, SavingsGoal,
    Transaction, User,
};
use hana_services::{
    AuthFailure, AuthService, AuthSession, Backend, LoanService, NotificationService,
    SavingsService, ServiceError, TransactionService,
};
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Fraction of the retry delay shaved off at random, so clients that failed
/// together do not retry together.
const RETRY_JITTER: f64 = 0.25;

/// Connection settings for the REST API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the API server, e.g. `https://api.hana.example`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Delay before the single retry of a retryable failure.
    pub retry_delay: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            retry_delay: Duration::from_millis(400),
        }
    }
}

/// One HTTP client implementing every service trait.
pub struct RemoteBackend {
    client: Client,
    config: RemoteConfig,
    /// Bearer token from the last successful login.
    token: RwLock<Option<String>>,
}

impl RemoteBackend {
    pub fn new(config: RemoteConfig) -> Result<Arc<Self>, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ServiceError::Internal(error.to_string()))?;

        Ok(Arc::new(Self {
            client,
            config,
            token: RwLock::new(None),
        }))
    }

    /// Build a [`Backend`] whose every handle talks to the REST API.
    pub fn connect(config: RemoteConfig) -> Result<Backend, ServiceError> {
        Ok(Self::new(config)?.into_backend())
    }

    /// Bundle this client behind each service handle.
    pub fn into_backend(self: Arc<Self>) -> Backend {
        Backend {
            auth: self.clone(),
            loans: self.clone(),
            savings: self.clone(),
            transactions: self.clone(),
            notifications: self,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// A request with the stored bearer token attached, if any.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = self.token.read().as_deref() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send once, mapping transport failures and error responses onto the
    /// taxonomy. Mutating requests go through this directly so a timed-out
    /// payment is never replayed.
    async fn attempt(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies from proxies may not be JSON at all.
        let detail = response.json::<ErrorBody>().await.unwrap_or_default().error;
        Err(map_error(status, detail))
    }

    /// Send with one bounded retry on retryable failures. Only idempotent
    /// requests come through here.
    async fn send_retrying<F>(&self, build: F) -> Result<Response, ServiceError>
    where
        F: Fn() -> RequestBuilder,
    {
        match self.attempt(build()).await {
            Err(error) if error.is_retryable() => {
                let delay = self
                    .config
                    .retry_delay
                    .mul_f64(1.0 - rand::random::<f64>() * RETRY_JITTER);
                debug!(delay_ms = delay.as_millis() as u64, %error, "retrying");
                tokio::time::sleep(delay).await;
                self.attempt(build()).await
            }
            outcome => outcome,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    response
        .json()
        .await
        .map_err(|error| ServiceError::Internal(format!("malformed response body: {error}")))
}

fn transport_error(error: reqwest::Error) -> ServiceError {
    let retryable = error.is_timeout() || error.is_connect() || error.is_request();
    ServiceError::network(error.to_string(), retryable)
}

/// Error envelope the API answers with on failure.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: ErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    fields: Vec<FieldError>,
    #[serde(default)]
    entity: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

/// Map a failure response onto the taxonomy, by error kind first and by
/// HTTP status when the body carries none.
fn map_error(status: StatusCode, detail: ErrorDetail) -> ServiceError {
    match detail.kind.as_str() {
        "invalid_credentials" => ServiceError::Auth(AuthFailure::InvalidCredentials),
        "session_expired" => ServiceError::Auth(AuthFailure::SessionExpired),
        "not_authorized" => ServiceError::Auth(AuthFailure::NotAuthorized),
        "validation" => ServiceError::Validation(detail.fields),
        "not_found" => ServiceError::NotFound {
            entity: detail.entity.unwrap_or_else(|| "resource".to_string()),
            id: detail.id.unwrap_or_default(),
        },
        _ => match status {
            StatusCode::UNAUTHORIZED => ServiceError::Auth(AuthFailure::SessionExpired),
            StatusCode::FORBIDDEN => ServiceError::Auth(AuthFailure::NotAuthorized),
            StatusCode::NOT_FOUND => {
                ServiceError::not_found("resource", detail.id.unwrap_or_default())
            }
            StatusCode::UNPROCESSABLE_ENTITY => ServiceError::Validation(detail.fields),
            status if status.is_server_error() => {
                let message = if detail.message.is_empty() {
                    format!("server answered {status}")
                } else {
                    detail.message
                };
                ServiceError::network(message, true)
            }
            status => ServiceError::Internal(format!("unexpected status {status}")),
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    user_id: String,
}

#[async_trait]
impl AuthService for RemoteBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError> {
        let response = self
            .attempt(
                self.request(Method::POST, "/api/auth/login")
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;
        let session: AuthSession = decode(response).await?;

        *self.token.write() = Some(session.token.clone());
        debug!(user_id = %session.user.id, "bearer token updated");
        Ok(session)
    }

    async fn register(&self, form: &RegistrationForm) -> Result<String, ServiceError> {
        let response = self
            .attempt(self.request(Method::POST, "/api/auth/register").json(form))
            .await?;
        let created: RegisterResponse = decode(response).await?;
        Ok(created.user_id)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ServiceError> {
        self.attempt(
            self.request(Method::POST, "/api/auth/password-reset")
                .json(&json!({ "email": email })),
        )
        .await?;
        Ok(())
    }

    async fn authorize(&self, token: &str) -> Result<User, ServiceError> {
        let response = self
            .send_retrying(|| self.client.get(self.url("/api/me")).bearer_auth(token))
            .await?;
        decode(response).await
    }

    async fn logout(&self, token: &str) -> Result<(), ServiceError> {
        self.attempt(
            self.client
                .post(self.url("/api/auth/logout"))
                .bearer_auth(token),
        )
        .await?;

        let mut stored = self.token.write();
        if stored.as_deref() == Some(token) {
            *stored = None;
        }
        Ok(())
    }
}

#[async_trait]
impl LoanService for RemoteBackend {
    async fn list_loans(
        &self,
        _user_id: &str,
        status: Option<LoanStatus>,
    ) -> Result<Vec<Loan>, ServiceError> {
        let response = self
            .send_retrying(|| {
                let mut request = self.request(Method::GET, "/api/loans");
                if let Some(status) = status {
                    request = request.query(&[("status", status.as_str())]);
                }
                request
            })
            .await?;
        decode(response).await
    }

    async fn loan_detail(&self, _user_id: &str, loan_id: &str) -> Result<Loan, ServiceError> {
        let path = format!("/api/loans/{loan_id}");
        let response = self
            .send_retrying(|| self.request(Method::GET, &path))
            .await?;
        decode(response).await
    }

    async fn pay_now(
        &self,
        _user_id: &str,
        loan_id: &str,
        amount: f64,
    ) -> Result<Transaction, ServiceError> {
        let path = format!("/api/loans/{loan_id}/payments");
        let response = self
            .attempt(
                self.request(Method::POST, &path)
                    .json(&json!({ "amount": amount })),
            )
            .await?;
        decode(response).await
    }

    async fn list_products(&self) -> Result<Vec<LoanProduct>, ServiceError> {
        let response = self
            .send_retrying(|| self.request(Method::GET, "/api/products"))
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl SavingsService for RemoteBackend {
    async fn list_accounts(&self, _user_id: &str) -> Result<Vec<SavingsAccount>, ServiceError> {
        let response = self
            .send_retrying(|| self.request(Method::GET, "/api/savings/accounts"))
            .await?;
        decode(response).await
    }

    async fn list_goals(&self, _user_id: &str) -> Result<Vec<SavingsGoal>, ServiceError> {
        let response = self
            .send_retrying(|| self.request(Method::GET, "/api/savings/goals"))
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl TransactionService for RemoteBackend {
    async fn list_transactions(
        &self,
        _user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, ServiceError> {
        let response = self
            .send_retrying(|| {
                let mut request = self.request(Method::GET, "/api/transactions");
                if let Some(range) = range {
                    request = request.query(&[
                        ("from", range.from.to_string()),
                        ("to", range.to.to_string()),
                    ]);
                }
                request
            })
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl NotificationService for RemoteBackend {
    async fn list_notifications(&self, _user_id: &str) -> Result<Vec<Notification>, ServiceError> {
        let response = self
            .send_retrying(|| self.request(Method::GET, "/api/notifications"))
            .await?;
        decode(response).await
    }
}
