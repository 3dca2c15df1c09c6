//! Code block syntax highlighting with syntect.

use anyhow::{Context, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Canonical language names with the syntect file extension used to look
/// each one up.
const SUPPORTED: &[(&str, &str)] = &[
    ("bash", "sh"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("csharp", "cs"),
    ("css", "css"),
    ("go", "go"),
    ("html", "html"),
    ("java", "java"),
    ("javascript", "js"),
    ("json", "json"),
    ("markdown", "md"),
    ("php", "php"),
    ("python", "py"),
    ("ruby", "rb"),
    ("rust", "rs"),
    ("sql", "sql"),
    ("typescript", "ts"),
    ("xml", "xml"),
    ("yaml", "yaml"),
];

/// Maps a code fence tag to a canonical supported language name.
///
/// Matching is case-insensitive and accepts common aliases (`js`, `py`,
/// `ts`, `sh`, `shell`, `yml`, `c++`, `c#`, `cs`, ...). Returns `None` for
/// unrecognized tags.
///
/// # Examples
///
/// ```
/// use blogkyl::normalize_language;
///
/// assert_eq!(normalize_language("JS"), Some("javascript"));
/// assert_eq!(normalize_language("c#"), Some("csharp"));
/// assert_eq!(normalize_language("brainfuck"), None);
/// ```
pub fn normalize_language(tag: &str) -> Option<&'static str> {
    let lowered = tag.trim().to_ascii_lowercase();
    let canonical = match lowered.as_str() {
        "js" | "jsx" | "mjs" | "node" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" | "python3" => "python",
        "sh" | "shell" | "zsh" | "console" => "bash",
        "yml" => "yaml",
        "c++" | "cc" | "hpp" => "cpp",
        "c#" | "cs" => "csharp",
        "rs" => "rust",
        "golang" => "go",
        "md" => "markdown",
        "rb" => "ruby",
        "htm" => "html",
        other => other,
    };

    SUPPORTED
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(name, _)| *name)
}

/// One numbered line of highlighted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// Line number starting at 1.
    pub number: usize,
    /// Escaped HTML for the line, without a trailing newline.
    pub html: String,
}

/// Highlighted code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    /// Canonical language, or `None` for untagged and unrecognised fences.
    ///
    /// A recognised language keeps its name even when its lines fall back
    /// to plain text.
    pub language: Option<&'static str>,
    pub lines: Vec<CodeLine>,
}

impl HighlightedCode {
    /// Label shown in the code block header.
    pub fn label(&self) -> &'static str {
        self.language.unwrap_or("text")
    }
}

/// Syntax highlighter producing inline-styled HTML per line.
///
/// Holds the syntect syntax definitions and one theme. Construction loads
/// the bundled definitions, so build one per process and share it.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Creates highlighter with the default theme.
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(DEFAULT_THEME).unwrap_or_default();

        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme,
        }
    }

    /// Creates highlighter with a named syntect theme.
    ///
    /// # Errors
    ///
    /// Returns error if no bundled theme has the given name.
    pub fn with_theme(name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes
            .remove(name)
            .with_context(|| format!("Unknown syntax highlighting theme: {}", name))?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme,
        })
    }

    /// Highlights code for a fence tag.
    ///
    /// Unknown tags, languages without a bundled syntax, and highlighting
    /// failures all degrade to escaped plain text. A recognised tag keeps
    /// its canonical name in [`HighlightedCode::language`] either way. Lines
    /// are numbered sequentially from 1; empty code yields a single empty
    /// line.
    pub fn highlight(&self, code: &str, tag: Option<&str>) -> HighlightedCode {
        let language = tag.and_then(normalize_language);

        let Some(syntax) = language.and_then(|lang| self.find_syntax(lang)) else {
            return plain(code, language);
        };

        match self.highlight_lines(code, syntax) {
            Ok(lines) => HighlightedCode { language, lines },
            Err(e) => {
                tracing::warn!(
                    language = language.unwrap_or("text"),
                    "Falling back to plain text: {:#}",
                    e
                );
                plain(code, language)
            }
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let extension = SUPPORTED
            .iter()
            .find(|(name, _)| *name == language)
            .map(|(_, ext)| *ext)?;

        self.syntax_set
            .find_syntax_by_extension(extension)
            .or_else(|| self.syntax_set.find_syntax_by_token(language))
    }

    fn highlight_lines(&self, code: &str, syntax: &SyntaxReference) -> Result<Vec<CodeLine>> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        split_lines(code)
            .enumerate()
            .map(|(idx, line)| -> Result<CodeLine> {
                let regions = highlighter
                    .highlight_line(line, &self.syntax_set)
                    .context("Failed to parse line for syntax highlighting")?;
                let html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
                    .context("Failed to render highlighted line")?;
                Ok(CodeLine {
                    number: idx + 1,
                    html,
                })
            })
            .collect()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn plain(code: &str, language: Option<&'static str>) -> HighlightedCode {
    let lines = split_lines(code)
        .enumerate()
        .map(|(idx, line)| CodeLine {
            number: idx + 1,
            html: html_escape::encode_text(line).into_owned(),
        })
        .collect();

    HighlightedCode { language, lines }
}

/// Splits on LF, keeping a final empty line only when the input is empty.
fn split_lines(code: &str) -> impl Iterator<Item = &str> {
    let mut lines: Vec<&str> = code.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines.into_iter()
}
