//! Authentication lifecycle against a stub backend: login persists the
//! session, register auto-logs-in, rejected credentials surface the server's
//! detail, and logout always lands back in the unauthenticated state.

mod common;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use common::{client_with_store, spawn_backend};
use parkline::api::models::Role;
use parkline::{AuthSession, AuthState};

#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<String>>>);

fn auth_backend(role: &'static str) -> Router {
    Router::new()
        .route(
            "/auth/register",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert!(body.get("name").is_some());
                assert!(body.get("role").is_some());
                (
                    StatusCode::CREATED,
                    Json(json!({"message": "Registered successfully"})),
                )
            }),
        )
        .route(
            "/auth/login",
            post(move |Json(body): Json<serde_json::Value>| async move {
                assert!(body.get("email").is_some());
                assert!(body.get("password").is_some());
                Json(json!({
                    "access_token": "tok-xyz",
                    "token_type": "bearer",
                    "role": role
                }))
            }),
        )
}

#[tokio::test]
async fn test_login_persists_token_and_role() {
    let addr = spawn_backend(auth_backend("admin")).await;
    let (client, store, _dir) = client_with_store(addr);
    let auth = AuthSession::new(client, store.clone());

    assert_eq!(auth.state(), AuthState::Unauthenticated);

    let state = auth.login("ama@example.com", "hunter22").await.unwrap();
    assert_eq!(state, AuthState::Authenticated { role: Role::Admin });

    // Token and user land together; the name derives from the email
    assert_eq!(store.token().as_deref(), Some("tok-xyz"));
    let user = store.user().unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.email, "ama@example.com");
    assert_eq!(user.name, "ama");
    assert_eq!(auth.state(), AuthState::Authenticated { role: Role::Admin });
}

#[tokio::test]
async fn test_rejected_login_surfaces_detail_and_leaves_store_untouched() {
    let app = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Invalid email or password"})),
            )
        }),
    );
    let addr = spawn_backend(app).await;
    let (client, store, _dir) = client_with_store(addr);
    let auth = AuthSession::new(client, store.clone());

    let err = auth.login("ama@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");

    assert!(store.token().is_none());
    assert!(store.user().is_none());
    assert_eq!(auth.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_register_auto_logs_in() {
    let log = CallLog::default();
    let app = Router::new()
        .route(
            "/auth/register",
            post(|State(log): State<CallLog>| async move {
                log.0.lock().unwrap().push("register".to_string());
                (
                    StatusCode::CREATED,
                    Json(json!({"message": "Registered successfully"})),
                )
            }),
        )
        .route(
            "/auth/login",
            post(|State(log): State<CallLog>| async move {
                log.0.lock().unwrap().push("login".to_string());
                Json(json!({
                    "access_token": "tok-new",
                    "token_type": "bearer",
                    "role": "driver"
                }))
            }),
        )
        .with_state(log.clone());
    let addr = spawn_backend(app).await;
    let (client, store, _dir) = client_with_store(addr);
    let auth = AuthSession::new(client, store.clone());

    let state = auth
        .register("Kofi", "kofi@example.com", "secret99", Role::Driver)
        .await
        .unwrap();

    assert_eq!(state, AuthState::Authenticated { role: Role::Driver });
    assert_eq!(*log.0.lock().unwrap(), vec!["register", "login"]);
    assert_eq!(store.token().as_deref(), Some("tok-new"));
}

#[tokio::test]
async fn test_failed_registration_establishes_no_session() {
    let app = Router::new().route(
        "/auth/register",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Email already registered"})),
            )
        }),
    );
    let addr = spawn_backend(app).await;
    let (client, store, _dir) = client_with_store(addr);
    let auth = AuthSession::new(client, store.clone());

    let err = auth
        .register("Kofi", "kofi@example.com", "secret99", Role::Driver)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already registered");
    assert_eq!(auth.state(), AuthState::Unauthenticated);
    assert!(store.token().is_none());
}

#[tokio::test]
async fn test_logout_always_lands_unauthenticated() {
    let addr = spawn_backend(auth_backend("driver")).await;
    let (client, store, _dir) = client_with_store(addr);
    let auth = AuthSession::new(client, store.clone());

    auth.login("kofi@example.com", "secret99").await.unwrap();
    assert_eq!(auth.state(), AuthState::Authenticated { role: Role::Driver });

    assert_eq!(auth.logout(), AuthState::Unauthenticated);
    assert!(store.token().is_none());
    assert!(store.user().is_none());

    // Logging out while already logged out stays a no-op
    assert_eq!(auth.logout(), AuthState::Unauthenticated);
    assert_eq!(auth.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_unauthorized_response_routes_into_logout() {
    let app = auth_backend("driver").route(
        "/parking/bookings/active",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"detail": "expired"}))) }),
    );
    let addr = spawn_backend(app).await;
    let (client, store, _dir) = client_with_store(addr);
    let auth = AuthSession::new(client.clone(), store.clone());

    auth.login("kofi@example.com", "secret99").await.unwrap();

    // A screen-level caller sees the distinguished condition and triggers
    // the implicit transition back to unauthenticated
    let err = client.active_booking().await.unwrap_err();
    assert!(err.is_unauthorized());
    auth.logout();
    assert_eq!(auth.state(), AuthState::Unauthenticated);
}
