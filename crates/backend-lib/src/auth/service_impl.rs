use std::sync::Arc;
use async_trait::async_trait;
use metrics::counter;
use tracing::{info, warn};
use uuid::Uuid;
use zeroize::Zeroize;

use credgate_common::{LoginRequest, RegisterRequest};
use crate::auth::{AuthIdentity, AuthService, AuthSession, PasswordHasher, TokenIssuer};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCESS, LOGOUT, USER_REGISTERED};
use crate::storage::{NewUser, UserStore};

/// Default credential authentication service, assembled from injected
/// collaborators
pub struct DefaultAuth {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl DefaultAuth {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

/// Local part of the email, or the whole string when no '@' is present
fn derive_username(email: &str) -> &str {
    match email.split_once('@') {
        Some((local, _)) => local,
        None => email,
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(&self, req: RegisterRequest) -> Result<AuthSession, AppError> {
        let RegisterRequest {
            email,
            mut password,
            mut password_confirmation,
        } = req;

        // hash before persisting: a hashing failure must not leave a user
        // record behind
        let password_hash = self
            .hasher
            .hash(&password)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        password.zeroize();
        password_confirmation.zeroize();

        let username = derive_username(&email).to_string();

        let user = self
            .users
            .create(NewUser {
                email,
                username,
                password_hash,
            })
            .await?;

        let issued = self.tokens.issue(&user).await;

        counter!(USER_REGISTERED).increment(1);
        info!(user_id = %user.id, username = %user.username, "user registered");

        Ok(AuthSession {
            token: issued.plaintext,
            user,
        })
    }

    async fn login(&self, req: LoginRequest) -> Result<AuthSession, AppError> {
        let LoginRequest {
            email,
            mut password,
        } = req;

        let Some(user) = self.users.find_by_email(&email).await? else {
            password.zeroize();
            counter!(LOGIN_FAILED).increment(1);
            warn!(email = %email, "login rejected: unknown email");
            return Err(AppError::UserNotFound);
        };

        let verified = self.hasher.verify(&password, &user.password_hash);
        password.zeroize();

        if !verified {
            counter!(LOGIN_FAILED).increment(1);
            warn!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AppError::PasswordMismatch);
        }

        let issued = self.tokens.issue(&user).await;

        counter!(LOGIN_SUCCESS).increment(1);
        info!(user_id = %user.id, "login succeeded");

        Ok(AuthSession {
            token: issued.plaintext,
            user,
        })
    }

    async fn authenticate(&self, bearer: &str) -> Result<AuthIdentity, AppError> {
        let token = self
            .tokens
            .resolve(bearer)
            .await
            .ok_or(AppError::InvalidToken)?;

        // the account may have disappeared since issuance
        let user = self
            .users
            .find_by_email(&token.email)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(AuthIdentity {
            user,
            token_id: token.id,
        })
    }

    async fn logout(&self, token_id: Uuid) -> Result<(), AppError> {
        // a second logout with the same token never reaches this point: the
        // transport layer fails the request while resolving the token
        self.tokens.revoke(token_id).await;
        counter!(LOGOUT).increment(1);

        Ok(())
    }
}
