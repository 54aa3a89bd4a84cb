//! Scanner that classifies larch source text line by line.

use crate::{Line, LineBody, RawValue, Span};
use tracing::trace;

/// A scanner that produces classified [`Line`]s from larch source text.
///
/// The scanner is total: every line classifies as blank, comment, or
/// entry, and malformed keys are reported by later stages, not here.
#[derive(Clone)]
pub struct Scanner<'src> {
    /// The remaining source text (suffix of the original input).
    remaining: &'src str,
    /// Current byte position in the original input.
    pos: u32,
    /// Number of the next line to be scanned, 1-based.
    next_number: u32,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            remaining: source,
            pos: 0,
            next_number: 1,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Consume the next physical line and its terminator. A trailing
    /// carriage return is stripped from the returned text.
    fn take_raw_line(&mut self) -> (u32, &'src str) {
        let start = self.pos;
        let (text, consumed) = match self.remaining.find('\n') {
            Some(idx) => (&self.remaining[..idx], idx + 1),
            None => (self.remaining, self.remaining.len()),
        };
        self.pos += consumed as u32;
        self.remaining = &self.remaining[consumed..];
        (start, text.strip_suffix('\r').unwrap_or(text))
    }

    /// Scan the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Option<Line<'src>> {
        if self.is_eof() {
            return None;
        }

        let (start, text) = self.take_raw_line();
        let number = self.next_number;
        self.next_number += 1;

        let line = Line {
            number,
            indent: leading_spaces(text),
            span: Span::new(start, start + text.len() as u32),
            body: classify(text, start),
        };
        trace!("line {} indent {}: {:?}", line.number, line.indent, line.body);
        Some(line)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

/// Count leading space characters. Stops at the first non-space, so a tab
/// contributes nothing to indentation.
fn leading_spaces(text: &str) -> u32 {
    text.bytes().take_while(|&b| b == b' ').count() as u32
}

/// Classify a line's content. `line_start` is the byte offset of the line
/// in the original input, used to place spans.
fn classify(text: &str, line_start: u32) -> LineBody<'_> {
    // Blank and comment checks skip spaces and tabs alike; only the
    // indentation count is space-sensitive.
    let blank_len = count_blank(text.bytes());
    let after_blank = &text[blank_len..];
    if after_blank.is_empty() {
        return LineBody::Blank;
    }
    if after_blank.starts_with('#') {
        return LineBody::Comment { text: after_blank };
    }

    let content_start = leading_spaces(text) as usize;
    let content = &text[content_start..];
    match content.find('=') {
        Some(eq) => {
            let (key, key_span) = trim_blank(&content[..eq], line_start + content_start as u32);
            let after_eq = &content[eq + 1..];
            let lead = count_blank(after_eq.bytes());
            let value_start = content_start + eq + 1 + lead;
            let value = RawValue {
                text: &text[value_start..],
                span: Span::new(line_start + value_start as u32, line_start + text.len() as u32),
            };
            LineBody::Entry {
                key,
                key_span,
                value: Some(value),
            }
        }
        None => {
            let (key, key_span) = trim_blank(content, line_start + content_start as u32);
            LineBody::Entry {
                key,
                key_span,
                value: None,
            }
        }
    }
}

/// Count leading spaces and tabs.
fn count_blank(bytes: impl Iterator<Item = u8>) -> usize {
    bytes.take_while(|b| matches!(b, b' ' | b'\t')).count()
}

/// Trim spaces and tabs from both ends, tracking the trimmed text's span.
fn trim_blank(text: &str, start: u32) -> (&str, Span) {
    let lead = count_blank(text.bytes());
    let trimmed = text[lead..].trim_end_matches([' ', '\t']);
    let trimmed_start = start + lead as u32;
    (
        trimmed,
        Span::new(trimmed_start, trimmed_start + trimmed.len() as u32),
    )
}
