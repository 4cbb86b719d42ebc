// ============================
// credgate-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng}, Scrypt};
use serde::{Deserialize, Serialize};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password complexity requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: false,
        }
    }
}

/// One-way password hashing seam. Swappable via dependency injection so the
/// service never calls a concrete KDF directly.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing digest string
    fn hash(&self, plain: &str) -> anyhow::Result<String>;

    /// Verify a plaintext password against a stored digest
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// scrypt-backed implementation of [`PasswordHasher`]
#[derive(Default)]
pub struct ScryptHasher;

impl PasswordHasher for ScryptHasher {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password(plain.as_bytes(), &salt)?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
    }
}
