//! Diagnostic rendering for parse failures.

use ariadne::{Color, Label, Report, ReportKind, Source};
use larch_scan::Span;

use crate::parser::ParseErrorKind;

/// A fatal parse failure with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where in the source.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Render this error with source context.
    ///
    /// Returns a string containing the formatted error message annotated
    /// against the offending input.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range = self.span.start as usize..self.span.end as usize;

        match &self.kind {
            ParseErrorKind::InvalidName { name } => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("invalid key name `{}`", name))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("not a legal key")
                            .with_color(Color::Red),
                    )
                    .with_help("keys may contain ASCII letters, digits, and $ - _ @ . & + /")
            }

            ParseErrorKind::DepthLimit { limit } => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("nesting exceeds {} levels", limit))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("this entry nests too deeply")
                            .with_color(Color::Red),
                    )
                    .with_help("raise the limit with ParseOptions::max_depth")
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::InvalidName { name } => write!(f, "invalid key name `{}`", name),
            ParseErrorKind::DepthLimit { limit } => write!(f, "nesting exceeds {} levels", limit),
        }?;
        write!(f, " at offset {}", self.span.start)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseOptions;

    #[test]
    fn test_invalid_name_report() {
        let source = "listen\n    bad port = 80";
        let err = ParseOptions::new().parse_str(source).unwrap_err();

        let rendered = err.render("app.larch", source);
        assert!(rendered.contains("invalid key name `bad port`"));
        assert!(rendered.contains("app.larch"));
        assert!(rendered.contains("bad port = 80"));
    }

    #[test]
    fn test_depth_limit_report() {
        let source = "a\n    b\n        c";
        let err = ParseOptions::new()
            .max_depth(2)
            .parse_str(source)
            .unwrap_err();

        let rendered = err.render("deep.larch", source);
        assert!(rendered.contains("nesting exceeds 2 levels"));
        assert!(rendered.contains("ParseOptions::max_depth"));
    }

    #[test]
    fn test_display_is_terse() {
        let source = "ok\nbad*key";
        let err = ParseOptions::new().parse_str(source).unwrap_err();
        assert_eq!(err.to_string(), "invalid key name `bad*key` at offset 3");
    }
}
