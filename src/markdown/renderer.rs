//! Markdown rendering to maud markup.

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use std::path::Path;

use super::blocks::{Block, parse_blocks};
use super::inline::{Span, plain_text, tokenize};
use crate::highlight::{HighlightedCode, Highlighter};

/// Renders article Markdown to HTML markup.
///
/// Parses the document into blocks, tokenizes inline spans inside text
/// blocks, and highlights fenced code with numbered lines. Rendering never
/// fails: malformed syntax degrades to literal text.
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    /// Creates renderer with the default highlighting theme.
    pub fn new() -> Self {
        Self {
            highlighter: Highlighter::new(),
        }
    }

    /// Creates renderer around a configured highlighter.
    pub fn with_highlighter(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }

    /// Renders Markdown content to markup.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown source, typically an article body
    ///
    /// # Returns
    ///
    /// Markup for the sequence of rendered blocks
    pub fn render(&self, content: &str) -> Markup {
        let blocks = parse_blocks(content);

        html! {
            @for block in &blocks {
                (self.render_block(block))
            }
        }
    }

    /// Renders Markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<Markup> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read markdown file: {}",
                path.as_ref().display()
            )
        })?;
        Ok(self.render(&content))
    }

    fn render_block(&self, block: &Block) -> Markup {
        match block {
            Block::Heading { level, text } => heading(*level, text),
            Block::Paragraph(text) => html! { p { (spans(text)) } },
            Block::List { ordered: true, items } => html! {
                ol { @for item in items { li { (spans(item)) } } }
            },
            Block::List { ordered: false, items } => html! {
                ul { @for item in items { li { (spans(item)) } } }
            },
            Block::Blockquote(text) => html! { blockquote { p { (spans(text)) } } },
            Block::HorizontalRule => html! { hr; },
            Block::CodeBlock { language, code } => {
                code_block(&self.highlighter.highlight(code, language.as_deref()))
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-cases text and joins alphanumeric runs with `-`.
///
/// # Examples
///
/// ```
/// use blogkyl::markdown::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn heading(level: u8, text: &str) -> Markup {
    let parsed = tokenize(text);
    let id = slugify(&plain_text(&parsed));
    let content = render_spans(&parsed);

    match level {
        1 => html! { h1 id=(id) { (content) } },
        2 => html! { h2 id=(id) { (content) } },
        3 => html! { h3 id=(id) { (content) } },
        4 => html! { h4 id=(id) { (content) } },
        5 => html! { h5 id=(id) { (content) } },
        _ => html! { h6 id=(id) { (content) } },
    }
}

fn spans(text: &str) -> Markup {
    render_spans(&tokenize(text))
}

fn render_spans(spans: &[Span]) -> Markup {
    html! {
        @for span in spans {
            @match span {
                Span::Text(t) => { (t) }
                Span::Code(c) => { code class="inline-code" { (c) } }
                Span::Image { alt, url } => { img src=(url) alt=(alt) loading="lazy"; }
                Span::Link { text, url } => {
                    a href=(url) target="_blank" rel="noopener noreferrer" { (text) }
                }
                Span::Bold(t) => { strong { (t) } }
                Span::Italic(t) => { em { (t) } }
                Span::Strikethrough(t) => { del { (t) } }
            }
        }
    }
}

fn code_block(highlighted: &HighlightedCode) -> Markup {
    html! {
        div class="code-block" {
            div class="code-header" {
                span class="code-language" { (highlighted.label()) }
            }
            pre class=(format!("language-{}", highlighted.label())) {
                code {
                    @for line in &highlighted.lines {
                        span class="code-line" {
                            span class="line-number" { (line.number) }
                            span class="line-content" { (PreEscaped(&line.html)) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new().render(markdown).into_string()
    }

    #[test]
    fn test_render_basic_markdown() {
        // Arrange
        let markdown = "# Hello\n\nThis is **bold** text.";

        // Act
        let html = render(markdown);

        // Assert
        assert!(html.contains("<h1 id=\"hello\">Hello</h1>"), "{}", html);
        assert!(html.contains("<p>This is <strong>bold</strong> text.</p>"), "{}", html);
    }

    #[test]
    fn test_render_inline_spans() {
        // Act
        let html = render("**a** and *b* and ~~c~~ and `d`");

        // Assert
        assert!(html.contains("<strong>a</strong>"), "{}", html);
        assert!(html.contains("<em>b</em>"), "{}", html);
        assert!(html.contains("<del>c</del>"), "{}", html);
        assert!(html.contains("<code class=\"inline-code\">d</code>"), "{}", html);
    }

    #[test]
    fn test_render_links_open_safely() {
        // Act
        let html = render("[site](https://example.com)");

        // Assert
        assert!(
            html.contains(
                "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
            ),
            "{}",
            html
        );
    }

    #[test]
    fn test_render_image() {
        // Act
        let html = render("![logo](/logo.png)");

        // Assert
        assert!(
            html.contains("<img src=\"/logo.png\" alt=\"logo\" loading=\"lazy\">"),
            "{}",
            html
        );
    }

    #[test]
    fn test_render_lists() {
        // Act
        let html = render("- a\n- b\n\n1. one");

        // Assert
        assert!(html.contains("<ul><li>a</li><li>b</li></ul>"), "{}", html);
        assert!(html.contains("<ol><li>one</li></ol>"), "{}", html);
    }

    #[test]
    fn test_render_blockquote_and_rule() {
        // Act
        let html = render("> wise words\n\n---");

        // Assert
        assert!(
            html.contains("<blockquote><p>wise words</p></blockquote>"),
            "{}",
            html
        );
        assert!(html.contains("<hr>"), "{}", html);
    }

    #[test]
    fn test_render_code_block_numbers_lines() {
        // Act
        let html = render("```python\nx = 1\ny = 2\n```");

        // Assert
        assert!(html.contains("<span class=\"code-language\">python</span>"), "{}", html);
        assert!(html.contains("<span class=\"line-number\">1</span>"), "{}", html);
        assert!(html.contains("<span class=\"line-number\">2</span>"), "{}", html);
        assert!(!html.contains("<span class=\"line-number\">3</span>"), "{}", html);
    }

    #[test]
    fn test_render_code_block_keeps_typescript_label() {
        // Act
        let html = render("```ts\nconst x: number = 1;\n```");

        // Assert
        assert!(
            html.contains("<span class=\"code-language\">typescript</span>"),
            "{}",
            html
        );
        assert!(html.contains("class=\"language-typescript\""), "{}", html);
        assert!(!html.contains("language-text"), "{}", html);
    }

    #[test]
    fn test_render_code_block_unknown_language() {
        // Act
        let html = render("```unknownlang\n<tag>\n```");

        // Assert
        assert!(html.contains("class=\"language-text\""), "{}", html);
        assert!(html.contains("&lt;tag&gt;"), "{}", html);
    }

    #[test]
    fn test_render_escapes_raw_html() {
        // Act
        let html = render("<script>alert('xss')</script>");

        // Assert
        assert!(!html.contains("<script>"), "{}", html);
        assert!(html.contains("&lt;script&gt;"), "{}", html);
    }

    #[test]
    fn test_render_code_block_not_inline_formatted() {
        // Act
        let html = render("```\n**not bold**\n```");

        // Assert
        assert!(!html.contains("<strong>"), "{}", html);
        assert!(html.contains("**not bold**"), "{}", html);
    }

    #[test]
    fn test_render_empty_markdown() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_render_malformed_input_does_not_panic() {
        // Arrange
        let inputs = [
            "```",
            "**",
            "![",
            "[a](",
            "# ",
            "- ",
            "> ",
            "~~~~~",
            "`",
            "\r\r\n\n",
            "*\u{00e9}*",
            "[\u{1F600}](\u{1F600})",
        ];

        // Act & Assert
        for input in inputs {
            let _ = render(input);
        }
    }

    #[test]
    fn test_render_file_missing() {
        // Arrange
        let renderer = MarkdownRenderer::default();

        // Act
        let result = renderer.render_file("/definitely/not/here.md");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust & Axum  "), "rust-axum");
        assert_eq!(slugify("***"), "");
        assert_eq!(slugify("Café Crème"), "café-crème");
    }

    #[test]
    fn test_render_large_document() {
        // Arrange
        let section = "# Section\n\nLorem *ipsum* dolor sit amet.\n\n```rust\nfn f() {}\n```\n\n";
        let large = section.repeat(500);

        // Act
        let html = render(&large);

        // Assert
        assert!(html.len() > large.len());
        assert_eq!(html.matches("<h1").count(), 500);
    }
}
