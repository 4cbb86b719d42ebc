// ============================
// credgate-backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the credgate authentication service.

pub mod config;
pub mod storage;
pub mod auth;
pub mod error;
pub mod metrics;
pub mod validation;
pub mod handlers;
pub mod http_router;

use std::sync::Arc;
use std::time::Duration;
use crate::auth::{AuthService, DefaultAuth, InMemoryTokenIssuer, ScryptHasher};
use crate::config::Settings;
use crate::storage::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential authentication service
    pub auth: Arc<dyn AuthService>,
    /// Settings manager
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state, wiring the default hasher and token
    /// issuer around the given user store
    pub fn new(users: Arc<dyn UserStore>, settings: Settings) -> Self {
        let hasher = Arc::new(ScryptHasher::default());
        let tokens = Arc::new(InMemoryTokenIssuer::new(Duration::from_secs(
            settings.token_ttl_secs,
        )));
        let auth = Arc::new(DefaultAuth::new(users, hasher, tokens));

        Self {
            auth,
            settings: Arc::new(settings),
        }
    }
}
