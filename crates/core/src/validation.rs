//! Registration Validation
//!
//! Field checks and the password strength rule for the signup flow. The
//! four password criteria are evaluated independently so the screen can
//! show a live checklist while the member types.

use serde::{Deserialize, Serialize};

/// Special characters accepted by the password rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Result of checking a password against each strength criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCriteria {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special_char: bool,
}

impl PasswordCriteria {
    pub const MIN_LENGTH: usize = 8;

    /// Evaluate all four criteria. Each check is independent of the others.
    pub fn evaluate(password: &str) -> Self {
        Self {
            has_min_length: password.chars().count() >= Self::MIN_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_special_char: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    pub fn all_met(&self) -> bool {
        self.has_min_length && self.has_uppercase && self.has_digit && self.has_special_char
    }
}

/// A single rejected field with a member-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The signup form as submitted by the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

impl RegistrationForm {
    /// Validate every field and collect all failures, not just the first.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let require = |errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str| {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        };

        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        require(
            &mut errors,
            "phoneNumber",
            &self.phone_number,
            "Phone number is required",
        );

        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }

        let criteria = PasswordCriteria::evaluate(&self.password);
        if !criteria.has_min_length {
            errors.push(FieldError::new("password", "At least 8 characters"));
        }
        if !criteria.has_uppercase {
            errors.push(FieldError::new("password", "One uppercase letter"));
        }
        if !criteria.has_digit {
            errors.push(FieldError::new("password", "One number"));
        }
        if !criteria.has_special_char {
            errors.push(FieldError::new("password", "One special character"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
