//! Error taxonomy for login and request authentication.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message returned for every credential failure.
///
/// Unknown usernames and wrong passwords share it so responses cannot be
/// used to enumerate accounts.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Errors produced by the auth gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed login input, such as an empty username or password.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session token was presented.
    #[error("missing session token")]
    MissingToken,

    /// Token expired, malformed, or carrying a bad signature.
    #[error("invalid session token")]
    TokenInvalid,

    /// Hashing, signing, or store failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error.
    ///
    /// - Validation: 400 Bad Request
    /// - Credential and token failures: 401 Unauthorized
    /// - Internal: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::MissingToken | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client facing message. Never includes internal detail.
    pub fn public_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            Self::MissingToken | Self::TokenInvalid => "Authentication required",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.public_message(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}
