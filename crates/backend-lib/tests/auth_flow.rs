//! End-to-end flow tests driving the HTTP router.
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use backend_lib::{config::Settings, http_router, storage::FlatFileUserStore, AppState};

fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let users = Arc::new(FlatFileUserStore::new(temp_dir.path()).unwrap());
    let state = Arc::new(AppState::new(users, Settings::default()));
    (http_router::create_router(state), temp_dir)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "email": email,
            "password": password,
            "password_confirmation": password,
        })),
        None,
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": email, "password": password })),
        None,
    )
    .await
}

#[tokio::test]
async fn register_derives_username_and_returns_token_once() {
    let (app, _temp) = test_app();

    let (status, body) = register(&app, "alice@example.com", "Secret123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Register successfully");
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    // the user view never carries password material
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_rejected_and_keeps_one_record() {
    let (app, temp) = test_app();

    let (status, _) = register(&app, "bob@example.com", "Secret123").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = register(&app, "bob@example.com", "Other456x").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["data"]["errors"]["email"].is_array());

    // exactly one user record survives the losing attempt
    let entries = std::fs::read_dir(temp.path().join("users")).unwrap().count();
    assert_eq!(entries, 1);

    // and the surviving record still authenticates with the original password
    let (status, _) = login(&app, "bob@example.com", "Secret123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn register_then_login_returns_same_user_with_fresh_tokens() {
    let (app, _temp) = test_app();

    let (_, registered) = register(&app, "alice@example.com", "Secret123").await;
    let (status, logged_in) = login(&app, "alice@example.com", "Secret123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["data"]["user"]["username"], "alice");
    assert_eq!(
        logged_in["data"]["user"]["id"],
        registered["data"]["user"]["id"]
    );

    // tokens are never reused across logins
    let (_, again) = login(&app, "alice@example.com", "Secret123").await;
    assert_ne!(registered["data"]["token"], logged_in["data"]["token"]);
    assert_ne!(logged_in["data"]["token"], again["data"]["token"]);
}

#[tokio::test]
async fn failed_logins_are_indistinguishable_in_shape_and_status() {
    let (app, _temp) = test_app();

    register(&app, "carol@example.com", "Secret123").await;

    let (wrong_status, wrong_body) = login(&app, "carol@example.com", "WrongPass1").await;
    let (unknown_status, unknown_body) = login(&app, "ghost@example.com", "Secret123").await;

    assert_eq!(wrong_status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(unknown_status, wrong_status);

    // same envelope shape, same error code: a caller cannot tell which
    // emails have accounts
    assert_eq!(wrong_body["success"], false);
    assert_eq!(unknown_body["success"], false);
    assert_eq!(wrong_body["data"], unknown_body["data"]);
}

#[tokio::test]
async fn validation_failures_map_field_messages() {
    let (app, _temp) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "email": "not-an-email",
            "password": "short",
            "password_confirmation": "different",
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = &body["data"]["errors"];
    assert!(errors["email"].is_array());
    assert!(errors["password"].is_array());
    assert!(errors["password_confirmation"].is_array());
}

#[tokio::test]
async fn login_with_token_returns_the_resolved_identity() {
    let (app, _temp) = test_app();

    let (_, registered) = register(&app, "dave@example.com", "Secret123").await;
    let token = registered["data"]["token"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/auth/login-with-token",
        None,
        Some(token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successfully");
    assert_eq!(body["data"]["username"], "dave");
    assert_eq!(body["data"]["id"], registered["data"]["user"]["id"]);
}

#[tokio::test]
async fn protected_routes_reject_missing_or_garbage_tokens() {
    let (app, _temp) = test_app();

    let (status, _) = send(&app, Method::GET, "/api/auth/login-with-token", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/auth/login-with-token",
        None,
        Some("garbage-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_only_the_presented_token() {
    let (app, _temp) = test_app();

    let (_, registered) = register(&app, "erin@example.com", "Secret123").await;
    let first_token = registered["data"]["token"].as_str().unwrap().to_string();

    let (_, logged_in) = login(&app, "erin@example.com", "Secret123").await;
    let second_token = logged_in["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/logout",
        None,
        Some(&first_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logout successfully");
    assert!(body["data"].is_null());

    // the presented token is dead
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/auth/login-with-token",
        None,
        Some(&first_token),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // the earlier token for the same user still works
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/auth/login-with-token",
        None,
        Some(&second_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // a second logout with the revoked token fails at the auth layer
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/logout",
        None,
        Some(&first_token),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let (app, _temp) = test_app();

    let (status, _) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
