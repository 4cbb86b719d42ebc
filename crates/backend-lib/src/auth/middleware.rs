// ============================
// credgate-backend-lib/src/auth/middleware.rs
// ============================
//! Bearer-token authentication middleware.
use std::sync::Arc;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, AppState};

/// Resolve the `Authorization: Bearer` credential and stash the caller
/// identity in request extensions for the downstream handler. Missing,
/// unknown, expired, and revoked tokens are all rejected here with 401 —
/// handlers behind this layer never see an unauthenticated request.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let identity = state.auth.authenticate(bearer).await?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
