use async_trait::async_trait;
use uuid::Uuid;

use credgate_common::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::storage::User;

/// Outcome of register and login: a freshly minted token plaintext and the
/// user it belongs to
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// The authenticated caller of the current request, as resolved from its
/// bearer token by the transport layer
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub user: User,
    pub token_id: Uuid,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and issue its first token
    async fn register(&self, req: RegisterRequest) -> Result<AuthSession, AppError>;
    /// Verify credentials and issue a fresh token
    async fn login(&self, req: LoginRequest) -> Result<AuthSession, AppError>;
    /// Resolve a presented bearer token to the identity it was issued for
    async fn authenticate(&self, bearer: &str) -> Result<AuthIdentity, AppError>;
    /// Revoke exactly the presented token, leaving the user's other tokens
    /// untouched
    async fn logout(&self, token_id: Uuid) -> Result<(), AppError>;
}
