//! HTTP routes for the public blog, the login flow, and the admin area.

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::assets::stylesheet;
use crate::auth::gate::DEFAULT_REDIRECT;
use crate::auth::{
    AuthError, AuthService, Identity, LoginSuccess, MemoryCredentialStore, TokenSigner,
    require_api_auth, require_page_auth, safe_redirect_target, token_from,
};
use crate::config::Config;
use crate::highlight::Highlighter;
use crate::markdown::MarkdownRenderer;
use crate::pages;
use crate::posts::PostLibrary;
use crate::util::unix_now;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub renderer: Arc<MarkdownRenderer>,
    pub posts: Arc<PostLibrary>,
}

impl AppState {
    pub fn new(auth: AuthService, renderer: MarkdownRenderer, posts: PostLibrary) -> Self {
        Self {
            auth: Arc::new(auth),
            renderer: Arc::new(renderer),
            posts: Arc::new(posts),
        }
    }

    /// Builds state from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the theme is unknown, the content directory cannot
    /// be read, or the auth settings are rejected.
    pub fn from_config(config: &Config) -> Result<Self> {
        let highlighter = Highlighter::with_theme(&config.theme)?;
        let posts = PostLibrary::load(&config.content)?;

        let store = MemoryCredentialStore::with_account(
            config.admin_user.trim(),
            config.admin_password_hash.as_str(),
        );
        let signer = TokenSigner::new(config.token_secret.as_bytes(), config.token_ttl)
            .context("Invalid token settings")?;
        let auth = AuthService::new(Arc::new(store), signer)
            .context("Failed to initialise auth service")?
            .with_secure_cookies(config.secure_cookies);

        Ok(Self::new(
            auth,
            MarkdownRenderer::with_highlighter(highlighter),
            posts,
        ))
    }

    fn signed_in(&self, jar: &CookieJar) -> bool {
        token_from(jar)
            .and_then(|token| self.auth.authenticate(token))
            .is_some()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/auth/me", get(api_me))
        .route("/api/admin/preview", post(api_preview))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_api_auth,
        ));

    let admin = Router::new()
        .route("/admin", get(admin_page))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_page_auth,
        ));

    Router::new()
        .route("/", get(index_page))
        .route("/posts/{slug}", get(post_page))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout))
        .route("/api/auth/login", post(api_login))
        .route("/api/auth/logout", post(api_logout))
        .route("/assets/{file}", get(asset))
        .merge(api)
        .merge(admin)
        .fallback(not_found)
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
///
/// # Errors
///
/// Returns error if state cannot be built, the address cannot be bound, or
/// the server fails.
pub async fn serve(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    let url = config.site_url();
    tracing::info!(%url, posts = state.posts.len(), "Serving blog");

    if config.open
        && let Err(e) = open::that(&url)
    {
        tracing::warn!("Failed to open browser: {}", e);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn index_page(State(state): State<AppState>, jar: CookieJar) -> Markup {
    pages::index::generate(state.posts.posts(), unix_now(), state.signed_in(&jar))
}

async fn post_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    jar: CookieJar,
    uri: Uri,
) -> Response {
    let signed_in = state.signed_in(&jar);

    match state.posts.get(&slug) {
        Some(post) => {
            let content = state.renderer.render(&post.body);
            pages::post::generate(post, content, unix_now(), signed_in).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            pages::not_found::generate(uri.path(), signed_in),
        )
            .into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct LoginQuery {
    #[serde(default)]
    redirect: Option<String>,
}

async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    let target = safe_redirect_target(query.redirect.as_deref().unwrap_or(DEFAULT_REDIRECT));

    if state.signed_in(&jar) {
        return Redirect::to(target).into_response();
    }

    pages::login::generate(target, "", None).into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginForm {
    username: String,
    password: String,
    redirect: String,
}

async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let target = safe_redirect_target(&form.redirect);

    match login_blocking(state.auth.clone(), form.username.clone(), form.password).await {
        Ok(success) => {
            let jar = state.auth.start_session(jar, success.token);
            (jar, Redirect::to(target)).into_response()
        }
        Err(e) => (
            e.status_code(),
            pages::login::generate(target, form.username.trim(), Some(e.public_message())),
        )
            .into_response(),
    }
}

/// Runs the Argon2 login check on the blocking pool.
async fn login_blocking(
    auth: Arc<AuthService>,
    username: String,
    password: String,
) -> Result<LoginSuccess, AuthError> {
    tokio::task::spawn_blocking(move || auth.login(&username, &password))
        .await
        .map_err(|e| AuthError::Internal(format!("Login task failed: {}", e)))?
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    (state.auth.logout(jar), Redirect::to("/")).into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRequest {
    username: String,
    password: String,
}

async fn api_login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Malformed login body: {}", rejection);
            return AuthError::Validation("Username and password are required".to_string())
                .into_response();
        }
    };

    match login_blocking(state.auth.clone(), request.username, request.password).await {
        Ok(success) => {
            let jar = state.auth.start_session(jar, success.token);
            let body = json!({
                "success": true,
                "data": success.user,
                "message": "Login successful",
            });
            (jar, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn api_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let body = json!({
        "success": true,
        "message": "Logged out",
    });
    (state.auth.logout(jar), Json(body)).into_response()
}

async fn api_me(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": identity,
    }))
}

#[derive(Debug, Deserialize)]
struct PreviewRequest {
    markdown: String,
}

async fn api_preview(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Malformed preview body: {}", rejection);
            return AuthError::Validation("Expected a JSON body with a markdown field".to_string())
                .into_response();
        }
    };

    let html = state.renderer.render(&request.markdown).into_string();
    Json(json!({
        "success": true,
        "data": { "html": html },
    }))
    .into_response()
}

async fn admin_page(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Markup {
    pages::admin::generate(&identity, state.posts.posts(), unix_now())
}

async fn asset(Path(file): Path<String>) -> Response {
    match stylesheet(&file) {
        Some(css) => ([(CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn not_found(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        pages::not_found::generate(uri.path(), state.signed_in(&jar)),
    )
        .into_response()
}
