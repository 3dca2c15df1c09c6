//! Request gate for protected routes.
//!
//! Two middleware flavours share one check. API routes answer a rejected
//! request with a 401 JSON body; page routes redirect the browser to the
//! login form, carrying the requested path so the user lands back on it.
//! Requests that pass carry an [`Identity`] extension for the handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::session::{clear_session, token_from};
use super::token::Identity;
use super::{AuthError, AuthService};

/// Where the browser goes after login when no usable target was given.
pub const DEFAULT_REDIRECT: &str = "/admin";

/// Path of the login form.
pub const LOGIN_PATH: &str = "/login";

fn check(auth: &AuthService, jar: &CookieJar) -> Result<Identity, AuthError> {
    let token = token_from(jar).ok_or(AuthError::MissingToken)?;
    auth.authenticate(token).ok_or(AuthError::TokenInvalid)
}

/// Gate for JSON API routes.
pub async fn require_api_auth(
    State(auth): State<Arc<AuthService>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match check(&auth, &jar) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "API request rejected: {}", e);
            e.into_response()
        }
    }
}

/// Gate for HTML page routes.
///
/// Rejected requests get a 303 to the login form. A cookie that was
/// presented but failed verification is cleared in the same response.
pub async fn require_page_auth(
    State(auth): State<Arc<AuthService>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match check(&auth, &jar) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            let requested = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            tracing::debug!(path = %requested, "Page request rejected: {}", e);

            let redirect = Redirect::to(&login_url(requested));
            match e {
                AuthError::TokenInvalid => (clear_session(jar), redirect).into_response(),
                _ => redirect.into_response(),
            }
        }
    }
}

/// Builds the login form URL that returns to `target` after sign in.
pub fn login_url(target: &str) -> String {
    let target = safe_redirect_target(target);
    match serde_urlencoded::to_string([("redirect", target)]) {
        Ok(query) => format!("{}?{}", LOGIN_PATH, query),
        Err(_) => LOGIN_PATH.to_string(),
    }
}

/// Restricts post-login redirects to local absolute paths.
///
/// Anything that could leave the site (`//host`, `https://host`,
/// backslash tricks) falls back to [`DEFAULT_REDIRECT`].
pub fn safe_redirect_target(target: &str) -> &str {
    let local = target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control);

    if local { target } else { DEFAULT_REDIRECT }
}
