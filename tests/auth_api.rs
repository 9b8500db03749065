//! Authentication API integration tests.
//!
//! Exercises the full HTTP surface against the in-memory store: multipart
//! registration, credential login, cookie and bearer authentication,
//! refresh token rotation, logout and password changes.

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use cliptube_auth::auth::{TokenCodec, TokenConfig};
use cliptube_auth::clock::SystemClock;
use cliptube_auth::media::{LocalMediaUploader, MediaUploader};
use cliptube_auth::routes::create_router;
use cliptube_auth::server::state::AppState;
use cliptube_auth::store::{MemoryUserStore, UserRecordStore};

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

fn test_state(media_root: &Path) -> AppState {
    let tokens = TokenCodec::new(
        TokenConfig {
            access_secret: "integration-access-secret".to_string(),
            refresh_secret: "integration-refresh-secret".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604800,
        },
        Arc::new(SystemClock),
    );
    let store: Arc<dyn UserRecordStore> = Arc::new(MemoryUserStore::new());
    let media: Arc<dyn MediaUploader> = Arc::new(LocalMediaUploader::new(media_root));
    AppState::new(store, media, tokens, media_root.to_path_buf())
}

fn spawn_server() -> (TestServer, TempDir) {
    let media_dir = tempfile::tempdir().expect("create temp media dir");
    let app = create_router(test_state(media_dir.path()));
    let server = TestServer::new(app).expect("start test server");
    (server, media_dir)
}

fn avatar_part() -> Part {
    Part::bytes(PNG_MAGIC.to_vec())
        .file_name("avatar.png")
        .mime_type("image/png")
}

fn register_form(full_name: &str, username: &str, email: &str, password: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("fullName", full_name)
        .add_text("email", email)
        .add_text("username", username)
        .add_text("password", password)
        .add_part("avatar", avatar_part())
}

async fn register_alice(server: &TestServer) {
    let response = server
        .post("/api/v1/users/register")
        .multipart(register_form(
            "Alice Example",
            "alice",
            "alice@example.com",
            "secret123",
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

/// Registers and logs in alice, returning (access token, refresh token).
async fn login_alice(server: &TestServer) -> (String, String) {
    register_alice(server).await;
    let response = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "alice", "password": "secret123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    let access = body["data"]["accessToken"].as_str().expect("access token");
    let refresh = body["data"]["refreshToken"].as_str().expect("refresh token");
    (access.to_string(), refresh.to_string())
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (server, _media) = spawn_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
}

#[tokio::test]
async fn unknown_route_falls_back_to_404() {
    let (server, _media) = spawn_server();

    let response = server.get("/api/v1/videos").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "404 Not Found");
}

#[tokio::test]
async fn register_returns_the_sanitized_user() {
    let (server, _media) = spawn_server();

    let response = server
        .post("/api/v1/users/register")
        .multipart(register_form(
            "Alice Example",
            "Alice",
            "Alice@Example.com",
            "secret123",
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["statusCode"], json!(201));
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User registered successfully"));

    // Identifiers come back normalized.
    assert_eq!(body["data"]["username"], json!("alice"));
    assert_eq!(body["data"]["email"], json!("alice@example.com"));
    assert_eq!(body["data"]["fullName"], json!("Alice Example"));

    // Credential material never leaves the server.
    let data = body["data"].as_object().expect("data object");
    assert!(!data.contains_key("password"));
    assert!(!data.contains_key("passwordHash"));
    assert!(!data.contains_key("refreshToken"));

    let avatar_url = body["data"]["avatarUrl"].as_str().expect("avatar url");
    assert!(avatar_url.starts_with("/media/"));
}

#[tokio::test]
async fn registered_avatar_is_served_back() {
    let (server, _media) = spawn_server();

    let response = server
        .post("/api/v1/users/register")
        .multipart(register_form(
            "Alice Example",
            "alice",
            "alice@example.com",
            "secret123",
        ))
        .await;
    let body = response.json::<Value>();
    let avatar_url = body["data"]["avatarUrl"].as_str().expect("avatar url");

    let served = server.get(avatar_url).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.as_bytes().as_ref(), PNG_MAGIC);
}

#[tokio::test]
async fn register_with_blank_field_is_rejected() {
    let (server, _media) = spawn_server();

    let response = server
        .post("/api/v1/users/register")
        .multipart(register_form("   ", "alice", "alice@example.com", "secret123"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!(null));
    assert_eq!(body["message"], json!("All fields are required"));
    assert_eq!(body["errors"], json!([]));
}

#[tokio::test]
async fn register_without_an_avatar_is_rejected() {
    let (server, _media) = spawn_server();

    let form = MultipartForm::new()
        .add_text("fullName", "Alice Example")
        .add_text("email", "alice@example.com")
        .add_text("username", "alice")
        .add_text("password", "secret123");

    let response = server.post("/api/v1/users/register").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Avatar file is required"));
}

#[tokio::test]
async fn register_with_taken_identifier_conflicts() {
    let (server, _media) = spawn_server();
    register_alice(&server).await;

    let response = server
        .post("/api/v1/users/register")
        .multipart(register_form(
            "Other Alice",
            "alice",
            "other@example.com",
            "secret456",
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("User with email or username already exists")
    );
}

#[tokio::test]
async fn login_sets_cookies_and_returns_the_pair() {
    let (server, _media) = spawn_server();
    register_alice(&server).await;

    let response = server
        .post("/api/v1/users/login")
        .json(&json!({ "email": "alice@example.com", "password": "secret123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("User logged in successfully"));
    assert_eq!(body["data"]["user"]["username"], json!("alice"));
    assert!(body["data"]["accessToken"].as_str().is_some());
    assert!(body["data"]["refreshToken"].as_str().is_some());

    let access_cookie = response.cookie("accessToken");
    assert!(!access_cookie.value().is_empty());
    assert_eq!(access_cookie.http_only(), Some(true));
    assert_eq!(access_cookie.secure(), Some(true));
    assert_eq!(access_cookie.path(), Some("/"));

    let refresh_cookie = response.cookie("refreshToken");
    assert!(!refresh_cookie.value().is_empty());
    assert_eq!(refresh_cookie.http_only(), Some(true));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (server, _media) = spawn_server();
    register_alice(&server).await;

    let response = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body = response.json::<Value>();
    assert_eq!(body["statusCode"], json!(401));
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!(null));
    assert_eq!(body["message"], json!("Invalid user credentials"));
    assert_eq!(body["errors"], json!([]));

    // A failed login never sets cookies.
    assert!(response.maybe_cookie("accessToken").is_none());
    assert!(response.maybe_cookie("refreshToken").is_none());
}

#[tokio::test]
async fn login_with_unknown_user_is_not_found() {
    let (server, _media) = spawn_server();

    let response = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "nobody", "password": "secret123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("User does not exist"));
}

#[tokio::test]
async fn current_user_requires_a_token() {
    let (server, _media) = spawn_server();

    let response = server.get("/api/v1/users/current-user").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Unauthorized request"));
}

#[tokio::test]
async fn current_user_accepts_a_bearer_token() {
    let (server, _media) = spawn_server();
    let (access, _refresh) = login_alice(&server).await;

    let response = server
        .get("/api/v1/users/current-user")
        .add_header("Authorization", bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Current user fetched successfully"));
    assert_eq!(body["data"]["username"], json!("alice"));
    assert_eq!(body["data"]["email"], json!("alice@example.com"));
}

#[tokio::test]
async fn current_user_accepts_the_access_cookie() {
    let (server, _media) = spawn_server();
    register_alice(&server).await;

    let login = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "alice", "password": "secret123" }))
        .await;

    let response = server
        .get("/api/v1/users/current-user")
        .add_cookie(login.cookie("accessToken"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() {
    let (server, _media) = spawn_server();
    login_alice(&server).await;

    let response = server
        .get("/api/v1/users/current-user")
        .add_header("Authorization", bearer("not-a-jwt"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Invalid access token"));
}

#[tokio::test]
async fn refresh_token_in_the_body_rotates_the_session() {
    let (server, _media) = spawn_server();
    let (_access, refresh) = login_alice(&server).await;

    let response = server
        .post("/api/v1/users/refresh-token")
        .json(&json!({ "refreshToken": refresh }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Access token refreshed"));
    let rotated = body["data"]["refreshToken"].as_str().expect("new refresh");
    assert_ne!(rotated, refresh);

    // Fresh cookies accompany the rotation.
    assert!(!response.cookie("accessToken").value().is_empty());
    assert!(!response.cookie("refreshToken").value().is_empty());

    // The replaced token is dead.
    let replay = server
        .post("/api/v1/users/refresh-token")
        .json(&json!({ "refreshToken": refresh }))
        .await;
    assert_eq!(replay.status_code(), StatusCode::UNAUTHORIZED);
    let replay_body = replay.json::<Value>();
    assert_eq!(
        replay_body["message"],
        json!("Refresh token is expired or used")
    );

    // The rotated one still works.
    let again = server
        .post("/api/v1/users/refresh-token")
        .json(&json!({ "refreshToken": rotated }))
        .await;
    assert_eq!(again.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_token_cookie_is_accepted_without_a_body() {
    let (server, _media) = spawn_server();
    register_alice(&server).await;

    let login = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "alice", "password": "secret123" }))
        .await;

    let response = server
        .post("/api/v1/users/refresh-token")
        .add_cookie(login.cookie("refreshToken"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_without_a_token_is_unauthorized() {
    let (server, _media) = spawn_server();

    let response = server.post("/api/v1/users/refresh-token").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Unauthorized request"));
}

#[tokio::test]
async fn logout_clears_cookies_and_invalidates_the_refresh_token() {
    let (server, _media) = spawn_server();
    let (access, refresh) = login_alice(&server).await;

    let response = server
        .post("/api/v1/users/logout")
        .add_header("Authorization", bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("User logged out successfully"));

    // Both cookies are expired client-side.
    assert_eq!(response.cookie("accessToken").value(), "");
    assert_eq!(response.cookie("refreshToken").value(), "");

    // And the stored refresh token is gone server-side.
    let replay = server
        .post("/api/v1/users/refresh-token")
        .json(&json!({ "refreshToken": refresh }))
        .await;
    assert_eq!(replay.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_swaps_the_login_credential() {
    let (server, _media) = spawn_server();
    let (access, _refresh) = login_alice(&server).await;

    let wrong = server
        .post("/api/v1/users/change-password")
        .add_header("Authorization", bearer(&access))
        .json(&json!({ "oldPassword": "nope", "newPassword": "secret456" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
    let wrong_body = wrong.json::<Value>();
    assert_eq!(wrong_body["message"], json!("Invalid old password"));

    let changed = server
        .post("/api/v1/users/change-password")
        .add_header("Authorization", bearer(&access))
        .json(&json!({ "oldPassword": "secret123", "newPassword": "secret456" }))
        .await;
    assert_eq!(changed.status_code(), StatusCode::OK);
    let changed_body = changed.json::<Value>();
    assert_eq!(
        changed_body["message"],
        json!("Password changed successfully")
    );

    // Old credential is dead, the new one works.
    let old_login = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "alice", "password": "secret123" }))
        .await;
    assert_eq!(old_login.status_code(), StatusCode::UNAUTHORIZED);

    let new_login = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": "alice", "password": "secret456" }))
        .await;
    assert_eq!(new_login.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn change_password_keeps_the_current_session_usable() {
    let (server, _media) = spawn_server();
    let (access, refresh) = login_alice(&server).await;

    let changed = server
        .post("/api/v1/users/change-password")
        .add_header("Authorization", bearer(&access))
        .json(&json!({ "oldPassword": "secret123", "newPassword": "secret456" }))
        .await;
    assert_eq!(changed.status_code(), StatusCode::OK);

    // The access token still authenticates and the refresh token still
    // rotates; a password change is not a logout.
    let me = server
        .get("/api/v1/users/current-user")
        .add_header("Authorization", bearer(&access))
        .await;
    assert_eq!(me.status_code(), StatusCode::OK);

    let rotated = server
        .post("/api/v1/users/refresh-token")
        .json(&json!({ "refreshToken": refresh }))
        .await;
    assert_eq!(rotated.status_code(), StatusCode::OK);
}
