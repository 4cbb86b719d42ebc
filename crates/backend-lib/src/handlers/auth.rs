// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Authentication endpoint handlers.
//!
//! Each handler validates its payload, delegates to the auth service, and
//! wraps the outcome in the uniform response envelope. The protected
//! handlers receive the caller identity from the bearer middleware; they do
//! not resolve tokens themselves.
use std::sync::Arc;
use axum::{extract::State, Extension, Json};

use credgate_common::{ApiResponse, AuthData, LoginRequest, RegisterRequest, UserView};
use crate::auth::AuthIdentity;
use crate::error::AppError;
use crate::validation;
use crate::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AppError> {
    validation::validate_register(&req, &state.settings.password_requirements)
        .map_err(AppError::Validation)?;

    let session = state.auth.register(req).await?;

    Ok(Json(ApiResponse::success(
        "Register successfully",
        AuthData {
            token: session.token,
            user: session.user.to_view(),
        },
    )))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AppError> {
    validation::validate_login(&req).map_err(AppError::Validation)?;

    let session = state.auth.login(req).await?;

    Ok(Json(ApiResponse::success(
        "Login successfully",
        AuthData {
            token: session.token,
            user: session.user.to_view(),
        },
    )))
}

/// GET /api/auth/login-with-token
///
/// The identity was already resolved upstream; return it verbatim.
pub async fn login_with_token(
    Extension(identity): Extension<AuthIdentity>,
) -> Json<ApiResponse<UserView>> {
    Json(ApiResponse::success(
        "Login successfully",
        identity.user.to_view(),
    ))
}

/// POST /api/auth/logout
///
/// Revokes exactly the token presented on this request.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.auth.logout(identity.token_id).await?;

    Ok(Json(ApiResponse::ok("Logout successfully")))
}
