// ============================
// credgate-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
pub mod middleware;
mod service;
mod service_impl;

pub use password::{PasswordHasher, PasswordRequirements, ScryptHasher, MIN_PASSWORD_LENGTH};
pub use token::{AuthToken, InMemoryTokenIssuer, IssuedToken, TokenIssuer, DEFAULT_TOKEN_TTL};
pub use service::{AuthIdentity, AuthService, AuthSession};
pub use service_impl::DefaultAuth;
pub use middleware::require_auth;
