// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the credgate backend and its API clients.
//! This module defines the request payloads, the user projection, and the
//! uniform response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for account registration
/// # Fields
/// * `email` - Unique account email; the username is derived from its local part
/// * `password` - Plaintext password, hashed server-side and never stored
/// * `password_confirmation` - Must match `password` exactly
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Payload for credential login
/// # Fields
/// * `email` - Account email, matched exactly
/// * `password` - Plaintext password, verified against the stored hash
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Client-facing projection of a user record.
/// Excludes the password hash by construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Data returned by register and login: the bearer token plaintext
/// (shown exactly once) and the user it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthData {
    pub token: String,
    pub user: UserView,
}

/// Uniform response envelope used by every endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response with no payload
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed response; `data` is filled in by the error layer when it has
    /// structure to add (error codes, field maps)
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
