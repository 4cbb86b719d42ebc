// ============================
// credgate-backend-lib/src/auth/token.rs
// ============================
//! Opaque bearer token issuance, resolution, and revocation.
use std::time::{Duration, SystemTime};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use metrics::{counter, gauge};
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;

use crate::metrics::{TOKEN_ACTIVE, TOKEN_ISSUED, TOKEN_REVOKED};
use crate::storage::User;

/// Default token TTL (time to live)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// Token size in bytes (32 bytes = 256 bits of entropy)
const TOKEN_BYTES: usize = 32;

/// A live token record, as resolved from a presented plaintext
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

/// A newly minted token. The plaintext is handed to the client exactly once
/// at issuance; afterwards only the id identifies the token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub id: Uuid,
    pub plaintext: String,
}

/// Trait for token issuer backends. Each token is bound to one user and one
/// client session; revocation targets a single token id, never the user's
/// whole token set.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a fresh opaque token bound to the given user
    async fn issue(&self, user: &User) -> IssuedToken;

    /// Resolve a presented plaintext to its token record, if the token is
    /// known and not expired
    async fn resolve(&self, plaintext: &str) -> Option<AuthToken>;

    /// Revoke the token with the given id. Returns whether a token was
    /// actually removed.
    async fn revoke(&self, token_id: Uuid) -> bool;
}

/// In-memory implementation of the `TokenIssuer` trait.
/// Expiry is enforced lazily on resolve; expired entries are dropped on
/// access.
pub struct InMemoryTokenIssuer {
    tokens: DashMap<String, AuthToken>,
    ttl: Duration,
}

impl InMemoryTokenIssuer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// Number of live (unrevoked, possibly expired) tokens
    pub fn active_count(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for InMemoryTokenIssuer {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_TTL)
    }
}

#[async_trait]
impl TokenIssuer for InMemoryTokenIssuer {
    async fn issue(&self, user: &User) -> IssuedToken {
        let plaintext = generate_secure_token();
        let now = SystemTime::now();
        let token = AuthToken {
            id: Uuid::new_v4(),
            user_id: user.id,
            email: user.email.clone(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        let id = token.id;

        self.tokens.insert(plaintext.clone(), token);

        counter!(TOKEN_ISSUED).increment(1);
        gauge!(TOKEN_ACTIVE).set(self.tokens.len() as f64);

        IssuedToken { id, plaintext }
    }

    async fn resolve(&self, plaintext: &str) -> Option<AuthToken> {
        let token = self.tokens.get(plaintext).map(|t| t.value().clone())?;

        if token.expires_at <= SystemTime::now() {
            self.tokens.remove(plaintext);
            gauge!(TOKEN_ACTIVE).set(self.tokens.len() as f64);
            return None;
        }

        Some(token)
    }

    async fn revoke(&self, token_id: Uuid) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| token.id != token_id);
        let removed = self.tokens.len() < before;

        if removed {
            counter!(TOKEN_REVOKED).increment(1);
            gauge!(TOKEN_ACTIVE).set(self.tokens.len() as f64);
        }

        removed
    }
}

/** Generate a cryptographically secure random token
This uses OS-provided entropy to create a secure random token
that is suitable for opaque bearer credentials.
# Returns
A base64 URL-safe encoded string without padding */
fn generate_secure_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
