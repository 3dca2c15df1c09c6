//! Credential storage seam.
//!
//! The auth service only needs two operations from storage: look up a
//! credential by username and record a successful login. Anything that
//! implements [`CredentialStore`] can be injected; [`MemoryCredentialStore`]
//! is the bundled implementation seeded from configuration.

use std::collections::HashMap;
use std::sync::RwLock;

use super::AuthError;

/// Stored account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Unix seconds of the previous successful login.
    pub last_login_at: Option<u64>,
}

impl Credential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            last_login_at: None,
        }
    }
}

/// Account lookup and login bookkeeping.
pub trait CredentialStore: Send + Sync {
    /// Finds the credential for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if the backing store fails.
    fn find(&self, username: &str) -> Result<Option<Credential>, AuthError>;

    /// Records a successful login at `at` (Unix seconds).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if the backing store fails.
    fn record_login(&self, username: &str, at: u64) -> Result<(), AuthError>;
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    accounts: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates store holding a single account.
    pub fn with_account(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(Credential::new(username, password_hash));
        store
    }

    /// Adds or replaces an account.
    pub fn insert(&self, credential: Credential) {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        accounts.insert(credential.username.clone(), credential);
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find(&self, username: &str) -> Result<Option<Credential>, AuthError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::Internal("credential store lock poisoned".to_string()))?;
        Ok(accounts.get(username).cloned())
    }

    fn record_login(&self, username: &str, at: u64) -> Result<(), AuthError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::Internal("credential store lock poisoned".to_string()))?;
        if let Some(account) = accounts.get_mut(username) {
            account.last_login_at = Some(at);
        }
        Ok(())
    }
}
