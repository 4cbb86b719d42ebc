// crates/backend-lib/src/handlers/mod.rs

//! HTTP handlers for the credgate authentication service.

pub mod auth;
