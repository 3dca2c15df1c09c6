//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::auth::{MIN_SECRET_LEN, is_valid_hash};
use crate::highlight::DEFAULT_THEME;

/// Command line interface for Blogkyl.
#[derive(Debug, Clone, Parser)]
#[command(name = "blogkyl", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parses the command line.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the blog and admin dashboard
    Serve(Config),

    /// Print an Argon2 hash for --admin-password-hash
    HashPassword {
        /// Password to hash (read from stdin when omitted)
        password: Option<String>,
    },
}

/// Server configuration.
#[derive(Clone, Args)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BLOGKYL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory of Markdown posts
    #[arg(long, env = "BLOGKYL_CONTENT", default_value = "content")]
    pub content: PathBuf,

    /// Admin username
    #[arg(long, env = "BLOGKYL_ADMIN_USER", default_value = "admin")]
    pub admin_user: String,

    /// Argon2 PHC hash of the admin password
    #[arg(long, env = "BLOGKYL_ADMIN_PASSWORD_HASH", hide_env_values = true)]
    pub admin_password_hash: String,

    /// Secret used to sign session tokens (at least 32 bytes)
    #[arg(long, env = "BLOGKYL_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Session lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    pub token_ttl: u64,

    /// Mark the session cookie Secure (serve behind HTTPS)
    #[arg(long)]
    pub secure_cookies: bool,

    /// Syntax highlighting theme (InspiredGitHub, base16-ocean.light, etc.)
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Log filter (error, warn, info, debug, trace or an EnvFilter directive)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Open the site in a browser once listening
    #[arg(long)]
    pub open: bool,
}

impl Config {
    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the admin username is empty, the token secret is
    /// too short, the token lifetime is zero, or the password hash is not
    /// a PHC string.
    pub fn validate(&self) -> Result<()> {
        if self.admin_user.trim().is_empty() {
            bail!("Admin username must not be empty");
        }

        if self.token_secret.len() < MIN_SECRET_LEN {
            bail!(
                "Token secret must be at least {} bytes, got {}",
                MIN_SECRET_LEN,
                self.token_secret.len()
            );
        }

        if self.token_ttl == 0 {
            bail!("Token lifetime must be positive");
        }

        if !is_valid_hash(&self.admin_password_hash) {
            bail!("Admin password hash is not a valid PHC string; generate one with `blogkyl hash-password`");
        }

        Ok(())
    }

    /// Returns the URL a browser should open for this server.
    pub fn site_url(&self) -> String {
        if self.bind.ip().is_unspecified() {
            format!("http://127.0.0.1:{}/", self.bind.port())
        } else {
            format!("http://{}/", self.bind)
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("content", &self.content)
            .field("admin_user", &self.admin_user)
            .field("admin_password_hash", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("secure_cookies", &self.secure_cookies)
            .field("theme", &self.theme)
            .field("log_level", &self.log_level)
            .field("open", &self.open)
            .finish()
    }
}
