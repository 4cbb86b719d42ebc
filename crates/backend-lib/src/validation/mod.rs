// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.
//! Field rules run in the transport layer, before the auth service is
//! called; the service itself assumes validated input.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use credgate_common::{LoginRequest, RegisterRequest};
use crate::auth::PasswordRequirements;

// Common validation constants
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Password confirmation does not match")]
    ConfirmationMismatch,
}

impl ValidationError {
    /// Request field this error belongs to
    fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail(_) => "email",
            ValidationError::InvalidPassword(_) => "password",
            ValidationError::ConfirmationMismatch => "password_confirmation",
        }
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field-to-messages map returned to clients on validation failure
#[derive(Debug, Default, Serialize)]
pub struct ValidationFailures(BTreeMap<&'static str, Vec<String>>);

impl ValidationFailures {
    fn record(&mut self, error: &ValidationError) {
        self.0
            .entry(error.field())
            .or_default()
            .push(error.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    // Email should not be empty
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password against the configured policy
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.len() < requirements.min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {} characters",
            requirements.min_length
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    if requirements.require_uppercase && !password.chars().any(char::is_uppercase) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if requirements.require_lowercase && !password.chars().any(char::is_lowercase) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one number".to_string(),
        ));
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one special character".to_string(),
        ));
    }

    Ok(password)
}

/// Validate a registration payload, collecting every field failure
pub fn validate_register(
    req: &RegisterRequest,
    requirements: &PasswordRequirements,
) -> Result<(), ValidationFailures> {
    let mut failures = ValidationFailures::default();

    if let Err(e) = validate_email(&req.email) {
        failures.record(&e);
    }
    if let Err(e) = validate_password(&req.password, requirements) {
        failures.record(&e);
    }
    if req.password != req.password_confirmation {
        failures.record(&ValidationError::ConfirmationMismatch);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

/// Validate a login payload. Password policy is not re-checked here: a
/// stored credential predating a policy change must still be able to log in.
pub fn validate_login(req: &LoginRequest) -> Result<(), ValidationFailures> {
    let mut failures = ValidationFailures::default();

    if let Err(e) = validate_email(&req.email) {
        failures.record(&e);
    }
    if req.password.is_empty() {
        failures.record(&ValidationError::InvalidPassword(
            "Password cannot be empty".to_string(),
        ));
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}
