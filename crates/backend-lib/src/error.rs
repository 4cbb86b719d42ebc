// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::ValidationFailures;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(ValidationFailures),

    #[error("The email has already been taken")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Password not match")]
    PasswordMismatch,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::EmailTaken
            | AppError::UserNotFound
            | AppError::PasswordMismatch => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    /// Both credential failures share one code so that callers cannot probe
    /// which emails have accounts.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::EmailTaken => "VAL_002",
            AppError::UserNotFound | AppError::PasswordMismatch => "CRED_001",
            AppError::InvalidToken => "AUTH_001",
            AppError::Hash(_) => "HASH_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(_) => "The given data was invalid".to_string(),
            AppError::EmailTaken => "The email has already been taken".to_string(),
            AppError::UserNotFound | AppError::PasswordMismatch => {
                "Invalid credentials".to_string()
            },
            AppError::InvalidToken => "Unauthenticated".to_string(),
            AppError::Hash(_) | AppError::Internal(_) | AppError::Io(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::Json(_) => "Invalid request format".to_string(),
        }
    }

    /// Field-level failure map, present only for validation-class errors
    fn field_errors(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation(failures) => serde_json::to_value(failures).ok(),
            AppError::EmailTaken => Some(serde_json::json!({
                "email": ["The email has already been taken"],
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        // Keep the uniform envelope shape even on failure
        let mut data = serde_json::json!({ "code": error_code });
        if let Some(errors) = self.field_errors() {
            data["errors"] = errors;
        }

        let body = serde_json::json!({
            "success": false,
            "message": message,
            "data": data,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
