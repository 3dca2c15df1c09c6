//! Signed, time-limited session tokens.
//!
//! Tokens are HS256 JWTs carrying `{sub, iat, exp}`. Nothing is stored
//! server side: validity is the signature plus the expiry check.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::util::unix_now;

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    /// Issued at, Unix seconds.
    pub iat: u64,
    /// Expiry, Unix seconds.
    pub exp: u64,
}

/// Identity recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
}

/// Issues and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenSigner {
    /// Creates signer from a secret and a token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes or the lifetime is zero.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Result<Self, AuthError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::Validation(format!(
                "token secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if ttl_secs == 0 {
            return Err(AuthError::Validation(
                "token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        })
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issues a token for `username` starting now.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if signing fails.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        self.issue_at(username, unix_now())
    }

    /// Issues a token as if signed at `issued_at` (Unix seconds).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if signing fails.
    pub fn issue_at(&self, username: &str, issued_at: u64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))
    }

    /// Verifies signature and expiry.
    ///
    /// Returns `None` for any failure: bad signature, expired, malformed
    /// payload, or an empty subject.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) if !data.claims.sub.is_empty() => Some(Identity {
                username: data.claims.sub,
            }),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                None
            }
        }
    }
}
