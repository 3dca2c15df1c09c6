//! Markdown rendering for article bodies.
//!
//! A line-oriented block parser ([`parse_blocks`]) splits the document into
//! headings, paragraphs, lists, blockquotes, rules and fenced code. Text
//! blocks are then split into typed inline spans by a single-pass tokenizer
//! ([`tokenize`]). [`MarkdownRenderer`] turns both into maud markup with
//! highlighted, line-numbered code blocks.
//!
//! Every input produces output; nothing in this module returns an error for
//! malformed Markdown.

mod blocks;
mod inline;
mod renderer;

pub use blocks::{Block, parse_blocks};
pub use inline::{Span, plain_text, tokenize};
pub use renderer::{MarkdownRenderer, slugify};
