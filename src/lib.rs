//! Personal blog server with a Markdown article reader and an admin area.

mod assets;
pub mod auth;
pub mod components;
mod config;
pub mod highlight;
pub mod markdown;
pub mod pages;
pub mod posts;
pub mod server;
mod util;

pub use config::{Cli, Command, Config};
pub use highlight::{HighlightedCode, Highlighter, normalize_language};
pub use markdown::MarkdownRenderer;
pub use posts::{Post, PostLibrary};
pub use server::{AppState, router, serve};
