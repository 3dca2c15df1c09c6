//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the cookie holding the session token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Builds the `auth_token` cookie for a freshly issued token.
///
/// The cookie is HttpOnly, SameSite=Lax, scoped to `/`, and lives as long
/// as the token itself.
pub fn session_cookie(token: String, ttl_secs: u64, secure: bool) -> Cookie<'static> {
    let max_age = i64::try_from(ttl_secs).unwrap_or(i64::MAX);

    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age))
        .secure(secure)
        .build()
}

/// Reads the session token from request cookies.
pub fn token_from(jar: &CookieJar) -> Option<&str> {
    jar.get(AUTH_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}

/// Adds an expired, empty `auth_token` cookie to the jar.
///
/// Emitted whether or not the request carried a session cookie.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut removal = Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    removal.make_removal();
    jar.add(removal)
}
