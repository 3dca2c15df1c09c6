//! Shared test utilities for integration tests.
//!
//! Builds application state over a temporary content directory and drives
//! the router in process, without binding a socket.

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use blogkyl::auth::{AuthService, MemoryCredentialStore, TokenSigner, hash_password};
use blogkyl::{AppState, MarkdownRenderer, PostLibrary, router};
use http_body_util::BodyExt;
use std::fs;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN: &str = "admin";
pub const PASSWORD: &str = "correct horse battery staple";
pub const SECRET: &[u8] = b"integration-test-secret-0123456789";
pub const TTL: u64 = 3600;

/// Argon2 is slow in debug builds; hash the shared password once.
fn admin_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).expect("Should hash password"))
}

/// Test application with its content directory kept alive.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _content: TempDir,
}

impl TestApp {
    /// Creates application with two posts on disk.
    ///
    /// # Errors
    ///
    /// Returns error if the content directory cannot be written or state
    /// cannot be built
    pub fn new() -> Result<Self> {
        let content = TempDir::new()?;
        fs::write(
            content.path().join("hello-world.md"),
            "# Hello World\n\nFirst post with **bold** text.\n\n```rust\nfn main() {}\n```\n",
        )?;
        fs::write(
            content.path().join("second.md"),
            "# Second Post\n\n- one\n- two\n",
        )?;

        let posts = PostLibrary::load(content.path())?;
        let store = MemoryCredentialStore::with_account(ADMIN, admin_hash());
        let signer = TokenSigner::new(SECRET, TTL)?;
        let auth = AuthService::new(Arc::new(store), signer)?;

        let state = AppState::new(auth, MarkdownRenderer::new(), posts);
        Ok(Self {
            router: router(state.clone()),
            state,
            _content: content,
        })
    }

    /// Sends one request through the router.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// Logs in through the JSON API and returns the session token.
    pub async fn login(&self) -> Result<String> {
        let response = self
            .send(json_post(
                "/api/auth/login",
                &format!(r#"{{"username":"{}","password":"{}"}}"#, ADMIN, PASSWORD),
            ))
            .await?;
        session_token(&response).context("Login should set session cookie")
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Valid request")
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, format!("auth_token={}", token))
        .body(Body::empty())
        .expect("Valid request")
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Valid request")
}

pub fn json_post_with_token(uri: &str, body: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(COOKIE, format!("auth_token={}", token))
        .body(Body::from(body.to_string()))
        .expect("Valid request")
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("Valid request")
}

/// Collects the response body as UTF8 text.
pub async fn body_string(response: Response<Body>) -> Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Collects the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Returns the raw `auth_token` Set-Cookie header, if any.
pub fn auth_set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("auth_token="))
        .map(String::from)
}

/// Extracts a non-empty session token from the response cookies.
pub fn session_token(response: &Response<Body>) -> Option<String> {
    let header = auth_set_cookie(response)?;
    let value = header
        .strip_prefix("auth_token=")?
        .split(';')
        .next()?
        .to_string();
    (!value.is_empty()).then_some(value)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}
