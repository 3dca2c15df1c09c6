//! Single-pass inline tokenizer.
//!
//! Inline code is cut out first, so no other marker can open or close
//! inside a code span. The text between code spans is then walked once,
//! trying the most specific marker first at every position: image, link,
//! bold, italic, strikethrough. A marker with no closing counterpart (or
//! with empty content) is kept as literal text. Spans are flat; the content
//! of a span is never re-tokenized.

/// Inline span produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    /// `` `code` ``
    Code(String),
    /// `![alt](url)`
    Image { alt: String, url: String },
    /// `[text](url)`
    Link { text: String, url: String },
    /// `**text**`
    Bold(String),
    /// `*text*`
    Italic(String),
    /// `~~text~~`
    Strikethrough(String),
}

/// URL schemes that are never turned into links or images.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Splits inline Markdown into typed spans.
///
/// Adjacent literal text is merged into a single [`Span::Text`].
///
/// # Examples
///
/// ```
/// use blogkyl::markdown::{Span, tokenize};
///
/// let spans = tokenize("**a** and `b`");
/// assert_eq!(
///     spans,
///     vec![
///         Span::Bold("a".into()),
///         Span::Text(" and ".into()),
///         Span::Code("b".into()),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut segment_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if rest.starts_with('`')
            && let Some((inner, consumed)) = delimited(rest, "`")
        {
            tokenize_segment(&text[segment_start..pos], &mut spans);
            spans.push(Span::Code(inner.to_string()));
            pos += consumed;
            segment_start = pos;
            continue;
        }

        pos += rest.chars().next().map_or(1, char::len_utf8);
    }

    tokenize_segment(&text[segment_start..], &mut spans);
    spans
}

/// Tokenizes text that holds no code spans, appending to `spans`.
fn tokenize_segment(segment: &str, spans: &mut Vec<Span>) {
    let mut literal = String::new();
    let mut pos = 0;

    while pos < segment.len() {
        let rest = &segment[pos..];

        if let Some((span, consumed)) = match_marker(rest) {
            if !literal.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut literal)));
            }
            spans.push(span);
            pos += consumed;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        literal.push(ch);
        pos += ch.len_utf8();
    }

    if !literal.is_empty() {
        spans.push(Span::Text(literal));
    }
}

/// Concatenates the visible text of spans, dropping markup.
///
/// Images contribute their alt text.
pub fn plain_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(t)
            | Span::Code(t)
            | Span::Bold(t)
            | Span::Italic(t)
            | Span::Strikethrough(t) => t.as_str(),
            Span::Image { alt, .. } => alt.as_str(),
            Span::Link { text, .. } => text.as_str(),
        })
        .collect()
}

/// Tries every marker at the start of `rest`, returning the span and the
/// number of bytes it consumed.
fn match_marker(rest: &str) -> Option<(Span, usize)> {
    if let Some(after_bang) = rest.strip_prefix('!')
        && let Some((alt, url, len)) = bracketed(after_bang, true)
    {
        return Some((
            Span::Image {
                alt: alt.to_string(),
                url: url.to_string(),
            },
            len + 1,
        ));
    }

    if let Some((label, url, len)) = bracketed(rest, false) {
        return Some((
            Span::Link {
                text: label.to_string(),
                url: url.to_string(),
            },
            len,
        ));
    }

    if rest.starts_with("**") {
        if let Some((inner, len)) = delimited(rest, "**") {
            return Some((Span::Bold(inner.to_string()), len));
        }
    } else if rest.starts_with('*') {
        if let Some((inner, len)) = delimited(rest, "*") {
            return Some((Span::Italic(inner.to_string()), len));
        }
    }

    if rest.starts_with("~~") {
        return delimited(rest, "~~")
            .map(|(inner, len)| (Span::Strikethrough(inner.to_string()), len));
    }

    None
}

/// Matches `marker content marker` with non-empty content.
fn delimited<'a>(rest: &'a str, marker: &str) -> Option<(&'a str, usize)> {
    let body = rest.strip_prefix(marker)?;
    let end = body.find(marker)?;
    if end == 0 {
        return None;
    }

    Some((&body[..end], marker.len() + end + marker.len()))
}

/// Matches `[label](url)`.
///
/// Labels cannot contain `[` or `]`; URLs cannot contain `[`, `)` or
/// whitespace. Each scan stops at the next `[`, so trying every position
/// of a line stays linear. Image alt text may be empty, link text may not.
fn bracketed(rest: &str, allow_empty_label: bool) -> Option<(&str, &str, usize)> {
    let body = rest.strip_prefix('[')?;
    let label_end = body.find(['[', ']'])?;
    if body.as_bytes()[label_end] != b']' {
        return None;
    }
    let label = &body[..label_end];
    if label.is_empty() && !allow_empty_label {
        return None;
    }

    let after_label = body[label_end + 1..].strip_prefix('(')?;
    let url_end = after_label.find(|c: char| c == ')' || c == '[' || c.is_whitespace())?;
    if after_label.as_bytes()[url_end] != b')' {
        return None;
    }
    let url = &after_label[..url_end];
    if url.is_empty() || !is_safe_url(url) {
        return None;
    }

    // `[` + label + `](` + url + `)`
    Some((label, url, 1 + label_end + 2 + url_end + 1))
}

fn is_safe_url(url: &str) -> bool {
    let lowered = url.trim_start().to_ascii_lowercase();
    !BLOCKED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
}
