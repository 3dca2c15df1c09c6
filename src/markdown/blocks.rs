//! Line-oriented block parser.
//!
//! Splits a Markdown document into a flat sequence of [`Block`] nodes in a
//! single forward pass. Each line is classified by the first rule that
//! matches, in this order: code fence, heading, unordered item, ordered
//! item, blockquote, horizontal rule, blank line, paragraph text.
//!
//! At most one accumulator (paragraph, list, or code block) is open at a
//! time. Starting a construct of another kind flushes the open one first.
//! The parser never fails: unterminated constructs are flushed as they are.

/// Block level node produced by [`parse_blocks`].
///
/// Text carried by headings, paragraphs, list items and blockquotes is raw
/// inline Markdown; run it through [`super::inline::tokenize`] for spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#` to `######` followed by text.
    Heading { level: u8, text: String },
    /// Consecutive plain text lines joined by single spaces.
    Paragraph(String),
    /// Run of items sharing one orderedness.
    List { ordered: bool, items: Vec<String> },
    /// Text after a `> ` prefix.
    Blockquote(String),
    /// `---` or `***` (three or more, no mixing).
    HorizontalRule,
    /// Fenced code with its optional language tag.
    CodeBlock {
        language: Option<String>,
        code: String,
    },
}

const FENCE: &str = "```";

/// Parses Markdown text into block nodes.
///
/// Line endings are normalized (CRLF and lone CR become LF) before splitting.
/// An unterminated code fence at end of input is emitted as a code block
/// holding whatever was accumulated.
///
/// # Examples
///
/// ```
/// use blogkyl::markdown::{Block, parse_blocks};
///
/// let blocks = parse_blocks("# Title\n\nHello *world*");
/// assert_eq!(
///     blocks,
///     vec![
///         Block::Heading { level: 1, text: "Title".into() },
///         Block::Paragraph("Hello *world*".into()),
///     ]
/// );
/// ```
pub fn parse_blocks(input: &str) -> Vec<Block> {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut state = ParseState::default();

    for line in normalized.split('\n') {
        state.feed(line);
    }

    state.finish()
}

/// Transient accumulators for the block pass.
#[derive(Debug, Default)]
struct ParseState {
    blocks: Vec<Block>,
    open: Open,
}

#[derive(Debug, Default)]
enum Open {
    #[default]
    Nothing,
    Paragraph(Vec<String>),
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Code {
        language: Option<String>,
        lines: Vec<String>,
    },
}

impl ParseState {
    fn feed(&mut self, line: &str) {
        if matches!(self.open, Open::Code { .. }) {
            if line.starts_with(FENCE) {
                self.flush();
            } else if let Open::Code { lines, .. } = &mut self.open {
                lines.push(line.to_string());
            }
            return;
        }

        if let Some(rest) = line.strip_prefix(FENCE) {
            self.flush();
            let tag = rest.trim();
            self.open = Open::Code {
                language: (!tag.is_empty()).then(|| tag.to_string()),
                lines: Vec::new(),
            };
            return;
        }

        let trimmed = line.trim_end();

        if let Some((level, text)) = heading(trimmed) {
            self.flush();
            self.blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
        } else if let Some(item) = unordered_item(trimmed) {
            self.push_item(false, item);
        } else if let Some(item) = ordered_item(trimmed) {
            self.push_item(true, item);
        } else if let Some(quote) = line.strip_prefix("> ") {
            self.flush();
            self.blocks.push(Block::Blockquote(quote.trim().to_string()));
        } else if is_horizontal_rule(trimmed) {
            self.flush();
            self.blocks.push(Block::HorizontalRule);
        } else if trimmed.trim_start().is_empty() {
            self.flush();
        } else {
            self.push_text(trimmed.trim_start());
        }
    }

    fn push_item(&mut self, ordered: bool, item: &str) {
        if let Open::List {
            ordered: open_ordered,
            items,
        } = &mut self.open
            && *open_ordered == ordered
        {
            items.push(item.to_string());
            return;
        }

        self.flush();
        self.open = Open::List {
            ordered,
            items: vec![item.to_string()],
        };
    }

    fn push_text(&mut self, text: &str) {
        if let Open::Paragraph(lines) = &mut self.open {
            lines.push(text.to_string());
            return;
        }

        self.flush();
        self.open = Open::Paragraph(vec![text.to_string()]);
    }

    /// Closes the open accumulator, emitting its block.
    fn flush(&mut self) {
        match std::mem::take(&mut self.open) {
            Open::Nothing => {}
            Open::Paragraph(lines) => self.blocks.push(Block::Paragraph(lines.join(" "))),
            Open::List { ordered, items } => self.blocks.push(Block::List { ordered, items }),
            Open::Code { language, lines } => {
                let code = lines.join("\n").trim_end_matches('\n').to_string();
                self.blocks.push(Block::CodeBlock { language, code });
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Matches `#{1,6}`, at least one space, then non-empty text.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let text = after_spaces(&line[hashes..])?;
    Some((hashes as u8, text))
}

/// Matches `-` or `*`, at least one space, then non-empty text.
fn unordered_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-').or_else(|| line.strip_prefix('*'))?;
    after_spaces(rest)
}

/// Matches one or more digits, `.`, at least one space, then non-empty text.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let rest = line[digits..].strip_prefix('.')?;
    after_spaces(rest)
}

/// Strips leading whitespace that must be present, returning non-empty text.
fn after_spaces(rest: &str) -> Option<&str> {
    let text = rest.trim_start();
    if text.len() == rest.len() || text.is_empty() {
        return None;
    }
    Some(text)
}

fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3 && (line.bytes().all(|b| b == b'-') || line.bytes().all(|b| b == b'*'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(text.to_string())
    }

    fn list(ordered: bool, items: &[&str]) -> Block {
        Block::List {
            ordered,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_heading_levels() {
        // Arrange
        let markdown = "# Title\n###### x";

        // Act
        let blocks = parse_blocks(markdown);

        // Assert
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::Heading {
                    level: 6,
                    text: "x".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_seven_hashes_is_not_heading() {
        // Act
        let blocks = parse_blocks("####### x");

        // Assert
        assert_eq!(blocks, vec![paragraph("####### x")]);
    }

    #[test]
    fn test_heading_requires_space() {
        // Act
        let blocks = parse_blocks("#hashtag");

        // Assert
        assert_eq!(blocks, vec![paragraph("#hashtag")]);
    }

    #[test]
    fn test_consecutive_items_form_one_list() {
        // Act
        let blocks = parse_blocks("- a\n- b");

        // Assert
        assert_eq!(blocks, vec![list(false, &["a", "b"])]);
    }

    #[test]
    fn test_switching_orderedness_flushes_list() {
        // Act
        let blocks = parse_blocks("- a\n1. c\n- b");

        // Assert
        assert_eq!(
            blocks,
            vec![list(false, &["a"]), list(true, &["c"]), list(false, &["b"])]
        );
    }

    #[test]
    fn test_star_items_share_list_with_dash_items() {
        // Act
        let blocks = parse_blocks("- a\n* b");

        // Assert
        assert_eq!(blocks, vec![list(false, &["a", "b"])]);
    }

    #[test]
    fn test_ordered_list_multi_digit() {
        // Act
        let blocks = parse_blocks("9. nine\n10. ten");

        // Assert
        assert_eq!(blocks, vec![list(true, &["nine", "ten"])]);
    }

    #[test]
    fn test_fenced_code_block_with_language() {
        // Act
        let blocks = parse_blocks("```python\nprint(1)\n```");

        // Assert
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: Some("python".to_string()),
                code: "print(1)".to_string()
            }]
        );
    }

    #[test]
    fn test_code_block_keeps_blank_lines_and_markup() {
        // Arrange
        let markdown = "```\n# not a heading\n\n- not a list\n```";

        // Act
        let blocks = parse_blocks(markdown);

        // Assert
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: None,
                code: "# not a heading\n\n- not a list".to_string()
            }]
        );
    }

    #[test]
    fn test_closing_fence_trailing_text_ignored() {
        // Act
        let blocks = parse_blocks("```rust\nlet x = 1;\n```ignored\nafter");

        // Assert
        assert_eq!(
            blocks,
            vec![
                Block::CodeBlock {
                    language: Some("rust".to_string()),
                    code: "let x = 1;".to_string()
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_emits_accumulated_code() {
        // Act
        let blocks = parse_blocks("intro\n```sh\necho hi\n\n");

        // Assert
        assert_eq!(
            blocks,
            vec![
                paragraph("intro"),
                Block::CodeBlock {
                    language: Some("sh".to_string()),
                    code: "echo hi".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_blockquote_and_rules() {
        // Act
        let blocks = parse_blocks("> quoted\n---\n***\n-*-");

        // Assert
        assert_eq!(
            blocks,
            vec![
                Block::Blockquote("quoted".to_string()),
                Block::HorizontalRule,
                Block::HorizontalRule,
                paragraph("-*-"),
            ]
        );
    }

    #[test]
    fn test_blockquote_requires_space() {
        // Act
        let blocks = parse_blocks(">tight");

        // Assert
        assert_eq!(blocks, vec![paragraph(">tight")]);
    }

    #[test]
    fn test_paragraph_lines_join_until_blank() {
        // Act
        let blocks = parse_blocks("one\ntwo\n\nthree");

        // Assert
        assert_eq!(blocks, vec![paragraph("one two"), paragraph("three")]);
    }

    #[test]
    fn test_text_after_list_starts_paragraph() {
        // Act
        let blocks = parse_blocks("- a\nplain");

        // Assert
        assert_eq!(blocks, vec![list(false, &["a"]), paragraph("plain")]);
    }

    #[test]
    fn test_list_item_after_paragraph_flushes_paragraph() {
        // Act
        let blocks = parse_blocks("plain\n- a");

        // Assert
        assert_eq!(blocks, vec![paragraph("plain"), list(false, &["a"])]);
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        // Act
        let blocks = parse_blocks("# A\r\n\r\nb\rc");

        // Assert
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "A".to_string()
                },
                paragraph("b c"),
            ]
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("   \n\t\n").is_empty());
    }

    #[test]
    fn test_bare_markers_fall_back_to_text() {
        // Act
        let blocks = parse_blocks("-\n1.\n#");

        // Assert
        assert_eq!(blocks, vec![paragraph("- 1. #")]);
    }
}
