//! Article library loaded from a directory of Markdown files.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::markdown::{Block, parse_blocks, plain_text, tokenize};
use crate::util::{system_time_secs, truncate_chars};

/// Longest excerpt shown on the index page, in characters.
pub const EXCERPT_CHARS: usize = 160;

/// Single published article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// URL segment, lower-case ASCII alphanumerics and `-`.
    pub slug: String,
    pub title: String,
    /// Plain text of the first paragraph, shortened.
    pub excerpt: String,
    /// Markdown source.
    pub body: String,
    /// Modification time, Unix seconds.
    pub updated_at: u64,
}

impl Post {
    /// Builds a post from its slug and Markdown source.
    ///
    /// Title comes from the first level-1 heading, falling back to the slug.
    pub fn from_markdown(slug: impl Into<String>, body: impl Into<String>, updated_at: u64) -> Self {
        let slug = slug.into();
        let body = body.into();
        let blocks = parse_blocks(&body);

        let title = blocks
            .iter()
            .find_map(|block| match block {
                Block::Heading { level: 1, text } => Some(plain_text(&tokenize(text))),
                _ => None,
            })
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| slug.clone());

        let excerpt = blocks
            .iter()
            .find_map(|block| match block {
                Block::Paragraph(text) => Some(plain_text(&tokenize(text))),
                _ => None,
            })
            .map(|text| truncate_chars(&text, EXCERPT_CHARS))
            .unwrap_or_default();

        Self {
            slug,
            title,
            excerpt,
            body,
            updated_at,
        }
    }
}

/// Posts ordered newest first.
#[derive(Debug, Clone, Default)]
pub struct PostLibrary {
    posts: Vec<Post>,
}

impl PostLibrary {
    /// Loads every `*.md` file directly inside `dir`.
    ///
    /// A missing directory yields an empty library. Files whose stem is not
    /// a valid slug are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or a post file cannot be read.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            tracing::warn!(dir = %dir.display(), "Content directory does not exist");
            return Ok(Self::default());
        }

        let mut entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read content directory: {}", dir.display()))?
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| {
                format!("Failed to read entry in content directory: {}", dir.display())
            })?;
        // Stable order, so the same file wins a slug clash on every load
        entries.sort_by_key(|entry| entry.file_name());

        let mut posts = Vec::new();
        let mut seen = HashSet::new();
        for entry in entries {
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let Some(slug) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_lowercase)
                .filter(|s| is_valid_slug(s))
            else {
                tracing::warn!(path = %path.display(), "Skipping post with unusable file name");
                continue;
            };

            if !seen.insert(slug.clone()) {
                tracing::warn!(
                    path = %path.display(),
                    slug = %slug,
                    "Skipping post with duplicate slug"
                );
                continue;
            }

            let body = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read post: {}", path.display()))?;
            let updated_at = entry
                .metadata()
                .and_then(|m| m.modified())
                .map(system_time_secs)
                .unwrap_or(0);

            posts.push(Post::from_markdown(slug, body, updated_at));
        }

        tracing::info!(count = posts.len(), dir = %dir.display(), "Loaded posts");
        Ok(Self::from_posts(posts))
    }

    /// Builds a library from already loaded posts.
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Self { posts }
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Returns true for non-empty lower-case ASCII alphanumeric and `-` text.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
