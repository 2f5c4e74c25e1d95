//! Client session lifecycle tests
//!
//! Drives the real `SessionManager` against a real server instance bound
//! to a local port, covering the full auth lifecycle: register, login,
//! persisted-token rehydration, profile update, invalidation on 401, and
//! logout. The server uses the in-memory credential store.

use std::path::PathBuf;

use pitwall::backend::server::config::Config;
use pitwall::backend::server::init::create_app;
use pitwall::client::config::ClientConfig;
use pitwall::client::session::{SessionManager, SessionStatus};
use pitwall::client::storage::TokenStorage;
use pitwall::shared::types::UpdateProfileRequest;
use tempfile::TempDir;

async fn spawn_server() -> String {
    let config = Config {
        jwt_secret: "integration-secret".to_string(),
        f1_api_url: "http://127.0.0.1:9/api/".to_string(),
        ai_api_url: "http://127.0.0.1:9".to_string(),
        ai_api_key: "test-key".to_string(),
        port: 0,
        database_url: None,
    };
    let app = create_app(config).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client_config(server_url: &str, dir: &TempDir) -> (ClientConfig, PathBuf) {
    let path = dir.path().join("token");
    (
        ClientConfig::with_server_url(server_url).storage_path(path.clone()),
        path,
    )
}

#[tokio::test]
async fn test_register_then_login_then_fetch_returns_same_user() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let (config, _) = client_config(&server_url, &dir);

    let mut session = SessionManager::new(config);

    session.register("alice", "a@x.com", "secret1").await;
    assert_eq!(session.status(), SessionStatus::Succeeded);
    // Registration does not authenticate
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());

    session.login("alice", "secret1").await;
    assert_eq!(session.status(), SessionStatus::Succeeded);
    assert!(session.is_authenticated());
    let logged_in_id = session.user().unwrap().id;

    session.fetch_current_user().await;
    assert_eq!(session.status(), SessionStatus::Succeeded);
    assert_eq!(session.user().unwrap().id, logged_in_id);
    assert_eq!(session.user().unwrap().username, "alice");
}

#[tokio::test]
async fn test_login_persists_token_for_new_manager() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let (config, path) = client_config(&server_url, &dir);

    let mut session = SessionManager::new(config.clone());
    session.register("alice", "a@x.com", "secret1").await;
    session.login("alice", "secret1").await;
    assert!(TokenStorage::at(path).load().is_some());

    // A fresh manager (fresh process, same storage) rehydrates identity
    let mut restored = SessionManager::new(config);
    restored.fetch_current_user().await;
    assert_eq!(restored.status(), SessionStatus::Succeeded);
    assert_eq!(restored.user().unwrap().username, "alice");
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let (config, _) = client_config(&server_url, &dir);

    let mut session = SessionManager::new(config);
    session.register("alice", "a@x.com", "secret1").await;

    session.login("alice", "wrong").await;
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error(), Some("Invalid username or password"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_invalid_persisted_token_clears_session() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let (config, path) = client_config(&server_url, &dir);

    // A stale/garbage token survives from an earlier run
    TokenStorage::at(path.clone()).save("stale.invalid.token");

    let mut session = SessionManager::new(config);
    session.fetch_current_user().await;

    assert_eq!(session.status(), SessionStatus::Failed);
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    // The terminal 401 also cleared persistent storage
    assert!(TokenStorage::at(path).load().is_none());
}

#[tokio::test]
async fn test_update_profile_favorites_round_trip() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let (config, _) = client_config(&server_url, &dir);

    let mut session = SessionManager::new(config);
    session.register("alice", "a@x.com", "secret1").await;
    session.login("alice", "secret1").await;

    session
        .update_profile(UpdateProfileRequest {
            favorite_driver_ids: Some(vec!["leclerc".to_string(), "sainz".to_string()]),
            ..Default::default()
        })
        .await;
    assert_eq!(session.status(), SessionStatus::Succeeded);

    session.fetch_current_user().await;
    let user = session.user().unwrap();
    assert_eq!(
        user.favorite_driver_ids,
        vec!["leclerc".to_string(), "sainz".to_string()]
    );
}

#[tokio::test]
async fn test_update_profile_conflict_keeps_session() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (bob_config, _) = client_config(&server_url, &dir);
    let mut bob = SessionManager::new(bob_config);
    bob.register("bob", "b@x.com", "secret1").await;

    let other_dir = TempDir::new().unwrap();
    let (config, _) = client_config(&server_url, &other_dir);
    let mut session = SessionManager::new(config);
    session.register("alice", "a@x.com", "secret1").await;
    session.login("alice", "secret1").await;

    session
        .update_profile(UpdateProfileRequest {
            username: Some("bob".to_string()),
            ..Default::default()
        })
        .await;

    // A 409 is an ordinary failure: message surfaced, session kept
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error(), Some("Username already taken"));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_identity_and_storage() {
    let server_url = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let (config, path) = client_config(&server_url, &dir);

    let mut session = SessionManager::new(config);
    session.register("alice", "a@x.com", "secret1").await;
    session.login("alice", "secret1").await;
    assert!(session.is_authenticated());

    session.logout();
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(TokenStorage::at(path).load().is_none());

    // Dependent reads after logout fail terminally
    session.fetch_current_user().await;
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error(), Some("No token"));
}
