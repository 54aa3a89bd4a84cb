//! Classified line records produced by the scanner.

use crate::Span;

/// One physical line of larch source, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'src> {
    /// 1-based line number.
    pub number: u32,
    /// Count of leading space characters. Tabs are not indentation; a tab
    /// ends the indent scan and is treated as content.
    pub indent: u32,
    /// Span of the line text, excluding the line terminator.
    pub span: Span,
    /// What the line contains.
    pub body: LineBody<'src>,
}

/// The classified content of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBody<'src> {
    /// Nothing but spaces and tabs.
    Blank,
    /// First non-blank character is `#`.
    Comment {
        /// Comment text including the leading `#`.
        text: &'src str,
    },
    /// A `key` or `key = value` entry.
    Entry {
        /// Key text with surrounding spaces and tabs removed.
        key: &'src str,
        /// Span of the trimmed key.
        key_span: Span,
        /// Raw value text after the first `=`, or `None` when the line
        /// has no `=` at all. The two are observably different: a key
        /// with no `=` has no value, `key =` has an empty one.
        value: Option<RawValue<'src>>,
    },
}

/// Undecoded value text with its location.
///
/// Comment stripping and quote removal happen later, in
/// [`decode_value`](crate::decode_value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawValue<'src> {
    /// The raw text, leading spaces and tabs removed.
    pub text: &'src str,
    /// Span of `text` in the source.
    pub span: Span,
}

impl Line<'_> {
    /// Whether this line contributes an entry (blank and comment lines
    /// never reach the tree).
    pub fn is_entry(&self) -> bool {
        matches!(self.body, LineBody::Entry { .. })
    }
}
