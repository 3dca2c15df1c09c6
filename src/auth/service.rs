//! Login, authentication, and logout.

use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;

use super::password::{hash_password, verify_password};
use super::store::CredentialStore;
use super::session::{clear_session, session_cookie};
use super::token::{Identity, TokenSigner};
use super::AuthError;
use crate::util::unix_now;

/// Account fields safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub username: String,
    /// Previous successful login, Unix seconds.
    pub last_login_at: Option<u64>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub token: String,
    pub user: UserInfo,
}

/// Single-admin authentication service.
///
/// Holds the injected credential store and the token signer. Every
/// operation is independent; the service keeps no per-session state.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    signer: TokenSigner,
    secure_cookies: bool,
    /// Hash verified when the username is unknown, so both failure paths
    /// cost one Argon2 verification.
    decoy_hash: String,
}

impl AuthService {
    /// Creates service over a credential store and signer.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if the decoy hash cannot be computed.
    pub fn new(store: Arc<dyn CredentialStore>, signer: TokenSigner) -> Result<Self, AuthError> {
        Ok(Self {
            store,
            signer,
            secure_cookies: false,
            decoy_hash: hash_password("decoy password for unknown accounts")?,
        })
    }

    /// Marks issued cookies as `Secure`.
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`]. On success the store's last-login
    /// timestamp is updated; the returned [`UserInfo`] carries the previous
    /// value.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if username or password is empty
    /// - [`AuthError::InvalidCredentials`] on unknown user or wrong password
    /// - [`AuthError::Internal`] on store or signing failure
    pub fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let Some(credential) = self.store.find(username)? else {
            // Same work as the known-user path
            let _ = verify_password(password, &self.decoy_hash);
            tracing::info!(username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &credential.password_hash) {
            tracing::info!(username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(&credential.username)?;

        if let Err(e) = self.store.record_login(&credential.username, unix_now()) {
            tracing::warn!(username, "Failed to record login time: {}", e);
        }

        tracing::info!(username, "Login succeeded");

        Ok(LoginSuccess {
            token,
            user: UserInfo {
                username: credential.username,
                last_login_at: credential.last_login_at,
            },
        })
    }

    /// Verifies a session token without consulting the store.
    ///
    /// Returns `None` on any failure.
    pub fn authenticate(&self, token: &str) -> Option<Identity> {
        self.signer.verify(token)
    }

    /// Stores a freshly issued token in the session cookie.
    pub fn start_session(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(session_cookie(
            token,
            self.signer.ttl_secs(),
            self.secure_cookies,
        ))
    }

    /// Ends the session on the client by expiring its cookie.
    ///
    /// Tokens are not revoked server side; a copied token stays valid until
    /// it expires.
    pub fn logout(&self, jar: CookieJar) -> CookieJar {
        clear_session(jar)
    }
}
