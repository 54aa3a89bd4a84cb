#![doc = include_str!("../README.md")]
//! Tree layer for the larch configuration format.
//!
//! This crate provides the owned [`Node`] tree, the indentation parser
//! that builds one from source text, and diagnostic rendering for parse
//! failures.

mod diagnostic;
mod node;
mod parser;

pub use diagnostic::ParseError;
pub use larch_scan::{Span, decode_value, is_valid_name};
pub use node::{LocateError, NameError, Node};
pub use parser::ParseErrorKind;

use std::io::Read;

/// Default bound on simultaneously open nesting levels, the implicit
/// root included. Override with [`ParseOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parse larch text into a tree with default options.
///
/// The returned root is always a synthetic node named `"root"`; the
/// input's own top-level entries are its children.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    ParseOptions::new().parse_str(source)
}

/// Parse policy: bundles the limits applied by the parsing entry points.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    max_depth: usize,
}

impl ParseOptions {
    /// Default policy.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Cap the number of simultaneously open nesting levels. The
    /// implicit root counts as one, so a limit of `n` admits entries
    /// down to nesting level `n - 1`.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Parse larch text into a tree.
    pub fn parse_str(&self, source: &str) -> Result<Node, ParseError> {
        parser::build(source, self.max_depth)
    }

    /// Read a byte source to its end and parse the result.
    ///
    /// I/O failures, invalid UTF-8 included, surface unchanged as
    /// [`LoadError::Io`].
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Node, LoadError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(self.parse_str(&source)?)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure while loading a tree from a byte source.
#[derive(Debug)]
pub enum LoadError {
    /// The byte source failed.
    Io(std::io::Error),
    /// The text did not parse.
    Parse(ParseError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "read failed: {}", err),
            LoadError::Parse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_convenience() {
        let root = parse("name = larch").unwrap();
        assert_eq!(root.child_by_name("name").unwrap().value(), Some("larch"));
    }

    #[test]
    fn test_parse_reader() {
        let root = ParseOptions::new()
            .parse_reader(Cursor::new("a\n    b = 1\n"))
            .unwrap();
        assert_eq!(root.locate("a/b").unwrap().value(), Some("1"));
    }

    #[test]
    fn test_parse_reader_surfaces_io_failure() {
        // Invalid UTF-8 is an I/O failure, not a parse failure.
        let result = ParseOptions::new().parse_reader(Cursor::new(&b"ok = 1\n\xff\xfe"[..]));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_parse_reader_surfaces_parse_failure() {
        let result = ParseOptions::new().parse_reader(Cursor::new("bad key"));
        match result {
            Err(LoadError::Parse(err)) => {
                assert!(matches!(err.kind, ParseErrorKind::InvalidName { .. }));
            }
            other => panic!("expected parse failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_programmatic_tree() {
        let mut root = Node::new("settings").unwrap();
        root.add_with_value("retries", "3").unwrap();
        assert_eq!(root.locate("retries").unwrap().value(), Some("3"));
    }
}
