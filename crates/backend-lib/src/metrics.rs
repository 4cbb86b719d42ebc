// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const USER_REGISTERED: &str = "auth.user.registered";
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILED: &str = "auth.login.failed";
pub const LOGOUT: &str = "auth.logout";
pub const TOKEN_ISSUED: &str = "auth.token.issued";
pub const TOKEN_REVOKED: &str = "auth.token.revoked";
pub const TOKEN_ACTIVE: &str = "auth.token.active";
