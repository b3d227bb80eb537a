//! Simulated Authentication
//!
//! Credential checks against the in-memory member table, with uuid bearer
//! tokens held in a session table.

use async_trait::async_trait;
use chrono::Utc;
use hana_core::validation::{FieldError, RegistrationForm};
use hana_core::User;
use tracing::info;
use uuid::Uuid;

use super::store::MemberRecord;
use super::SimulatedContext;
use crate::error::{AuthFailure, ServiceError};
use crate::traits::{AuthService, AuthSession};

pub struct SimulatedAuthService {
    ctx: SimulatedContext,
}

impl SimulatedAuthService {
    pub(crate) fn new(ctx: SimulatedContext) -> Self {
        Self { ctx }
    }

    fn issue_token(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.ctx
            .store
            .tokens
            .insert(token.clone(), user_id.to_string());
        token
    }
}

#[async_trait]
impl AuthService for SimulatedAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError> {
        self.ctx.begin().await?;

        let user_id = self
            .ctx
            .store
            .emails
            .get(&email.trim().to_lowercase())
            .map(|entry| entry.value().clone())
            .ok_or(ServiceError::Auth(AuthFailure::InvalidCredentials))?;

        let user = {
            let member = self
                .ctx
                .store
                .members
                .get(&user_id)
                .ok_or(ServiceError::Auth(AuthFailure::InvalidCredentials))?;
            if member.password != password {
                return Err(ServiceError::Auth(AuthFailure::InvalidCredentials));
            }
            member.user.clone()
        };

        let token = self.issue_token(&user.id);
        info!(user_id = %user.id, "member logged in");

        Ok(AuthSession { token, user })
    }

    async fn register(&self, form: &RegistrationForm) -> Result<String, ServiceError> {
        self.ctx.begin().await?;

        form.validate().map_err(ServiceError::Validation)?;

        let email_key = form.email.trim().to_lowercase();
        if self.ctx.store.emails.contains_key(&email_key) {
            return Err(ServiceError::Validation(vec![FieldError::new(
                "email",
                "An account with this email already exists",
            )]));
        }

        let user = User {
            id: format!("usr-{}", Uuid::new_v4().simple()),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone_number: form.phone_number.trim().to_string(),
            profile_picture: None,
            address: None,
            occupation: None,
            id_number: None,
            join_date: Utc::now().date_naive(),
        };
        let user_id = user.id.clone();

        self.ctx.store.add_member(MemberRecord {
            user,
            password: form.password.clone(),
        });
        info!(user_id = %user_id, "member registered");

        Ok(user_id)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ServiceError> {
        self.ctx.begin().await?;

        if email.trim().is_empty() || !email.contains('@') {
            return Err(ServiceError::invalid_field(
                "email",
                "Enter a valid email address",
            ));
        }

        // Same response whether or not the account exists.
        info!("password reset requested");
        Ok(())
    }

    async fn authorize(&self, token: &str) -> Result<User, ServiceError> {
        self.ctx.begin().await?;

        let user_id = self
            .ctx
            .store
            .tokens
            .get(token)
            .map(|entry| entry.value().clone())
            .ok_or(ServiceError::Auth(AuthFailure::SessionExpired))?;

        let member = self
            .ctx
            .store
            .members
            .get(&user_id)
            .ok_or(ServiceError::Auth(AuthFailure::SessionExpired))?;

        Ok(member.user.clone())
    }

    async fn logout(&self, token: &str) -> Result<(), ServiceError> {
        self.ctx.begin().await?;
        self.ctx.store.tokens.remove(token);
        Ok(())
    }
}
