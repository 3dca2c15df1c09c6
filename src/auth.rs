//! Single-admin authentication.
//!
//! Passwords are stored as Argon2 hashes, sessions are stateless signed
//! tokens carried in the `auth_token` cookie, and protected routes sit
//! behind the middleware in [`gate`].

mod error;
pub mod gate;
mod password;
mod service;
mod session;
mod store;
mod token;

pub use error::{AuthError, INVALID_CREDENTIALS_MESSAGE};
pub use gate::{require_api_auth, require_page_auth, safe_redirect_target};
pub use password::{hash_password, is_valid_hash, verify_password};
pub use service::{AuthService, LoginSuccess, UserInfo};
pub use session::{AUTH_COOKIE, clear_session, session_cookie, token_from};
pub use store::{Credential, CredentialStore, MemoryCredentialStore};
pub use token::{Claims, Identity, MIN_SECRET_LEN, TokenSigner};
