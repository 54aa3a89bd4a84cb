//! Assembly of scanned lines into a configuration tree.

use larch_scan::{LineBody, Scanner, decode_value, is_valid_name};
use tracing::trace;

use crate::Node;
use crate::diagnostic::ParseError;

/// Every parsed tree hangs off a synthetic root with this name, even
/// when the input's own top-level entries are unindented.
const ROOT_NAME: &str = "root";

/// Kinds of fatal parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A key failed name validation.
    InvalidName {
        /// The rejected key text.
        name: String,
    },
    /// Nesting exceeded the configured depth limit.
    DepthLimit {
        /// The limit that was in effect.
        limit: usize,
    },
}

/// A node under construction, filed at the nesting level it opened.
struct Frame {
    node: Node,
    level: usize,
}

/// Map a leading-space count to a nesting level. Indentation is read in
/// 4-space bands: any indent of 1 through 4 is the first nested level,
/// 5 through 8 the second, and so on. In-band inconsistency is accepted.
fn nesting_level(indent: u32) -> usize {
    if indent == 0 {
        0
    } else {
        1 + (indent as usize - 1) / 4
    }
}

/// Build a tree from larch source text.
///
/// `max_depth` bounds the number of simultaneously open nodes, the
/// implicit root included. Any failure drops every node built so far;
/// a partial tree is never returned.
pub(crate) fn build(source: &str, max_depth: usize) -> Result<Node, ParseError> {
    let mut stack = vec![Frame {
        node: Node::unchecked(ROOT_NAME),
        level: 0,
    }];

    for line in Scanner::new(source) {
        let LineBody::Entry {
            key,
            key_span,
            value,
        } = line.body
        else {
            continue;
        };

        if !is_valid_name(key) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidName {
                    name: key.to_string(),
                },
                key_span,
            ));
        }

        // Close everything nested at or below this line's level; each
        // closed node attaches to the frame beneath it, so the top frame
        // is this line's parent afterwards.
        let level = nesting_level(line.indent);
        while stack.last().is_some_and(|frame| frame.level >= level + 1) {
            attach_top(&mut stack);
        }

        if stack.len() >= max_depth {
            return Err(ParseError::new(
                ParseErrorKind::DepthLimit { limit: max_depth },
                line.span,
            ));
        }

        let mut node = Node::unchecked(key);
        if let Some(raw) = value {
            node.set_value(decode_value(raw.text));
        }
        trace!(
            "line {}: open {:?} at level {} (depth {})",
            line.number,
            node.name(),
            level,
            stack.len()
        );
        stack.push(Frame {
            node,
            level: level + 1,
        });
    }

    while stack.len() > 1 {
        attach_top(&mut stack);
    }
    // The root frame is at level 0 and is never popped by the loops
    // above, so exactly one frame remains.
    Ok(stack.swap_remove(0).node)
}

/// Pop the top frame and append its node to the frame below.
fn attach_top(stack: &mut Vec<Frame>) {
    if let Some(done) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.node.push_child(done.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MAX_DEPTH;

    fn parse(source: &str) -> Node {
        build(source, DEFAULT_MAX_DEPTH).unwrap()
    }

    /// Depth-first (name, depth) pairs, root excluded.
    fn shape(node: &Node) -> Vec<(String, usize)> {
        fn walk(node: &Node, depth: usize, out: &mut Vec<(String, usize)>) {
            for child in node.children() {
                out.push((child.name().to_string(), depth));
                walk(child, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(node, 0, &mut out);
        out
    }

    fn owned(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(n, d)| (n.to_string(), *d)).collect()
    }

    #[test]
    fn test_root_is_synthetic() {
        let root = parse("top");
        assert_eq!(root.name(), "root");
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let root = parse("");
        assert_eq!(root.name(), "root");
        assert!(root.is_empty());
    }

    #[test]
    fn test_indentation_mapping() {
        let root = parse("k1\n    k2\n        k3\n    k4");
        assert_eq!(
            shape(&root),
            owned(&[("k1", 0), ("k2", 1), ("k3", 2), ("k4", 1)])
        );
    }

    #[test]
    fn test_indent_bands_are_four_wide() {
        // Indents 2 and 4 land in the same band; 5 starts the next one.
        let root = parse("a\n  b\n    c\n     d");
        assert_eq!(
            shape(&root),
            owned(&[("a", 0), ("b", 1), ("c", 1), ("d", 2)])
        );
    }

    #[test]
    fn test_level_jumps_recorded_as_filed() {
        // b opens at level 2 even though level 1 is vacant; a later
        // level-1 line closes it back to a.
        let root = parse("a\n        b\n    c");
        assert_eq!(shape(&root), owned(&[("a", 0), ("b", 1), ("c", 1)]));
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let root = parse("# heading\n\na = 1\n   \n# note\n    b = 2");
        assert_eq!(shape(&root), owned(&[("a", 0), ("b", 1)]));
    }

    #[test]
    fn test_values_are_decoded() {
        let root = parse("k = v # comment\nq = 'v # literal'");
        assert_eq!(root.child_by_name("k").unwrap().value(), Some("v"));
        assert_eq!(
            root.child_by_name("q").unwrap().value(),
            Some("v # literal")
        );
    }

    #[test]
    fn test_absent_versus_empty_value() {
        let root = parse("bare\nassigned = ");
        assert_eq!(root.child_by_name("bare").unwrap().value(), None);
        assert_eq!(root.child_by_name("assigned").unwrap().value(), Some(""));
    }

    #[test]
    fn test_repeated_keys_arrive_in_order() {
        let root = parse("bind = a\nbind = b\nbind = c");
        let values: Vec<_> = root
            .children_named("bind")
            .map(|n| n.value().unwrap())
            .collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_name_aborts() {
        let err = build("fine = 1\nbad key = 2", DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidName {
                name: "bad key".to_string()
            }
        );
        // The span points at the offending key.
        assert_eq!(err.span.slice("fine = 1\nbad key = 2"), "bad key");
    }

    #[test]
    fn test_depth_limit() {
        // Root plus three opens fills a limit of 4; the fourth nested
        // line fails.
        let source = "a\n    b\n        c\n            d";
        assert!(build(source, 5).is_ok());
        let err = build(source, 4).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DepthLimit { limit: 4 });
    }

    #[test]
    fn test_tab_led_lines_measure_indent_zero() {
        // Tabs are not indentation, so the tabbed line is a top-level
        // sibling with the tab trimmed out of its key.
        let root = parse("a\n\tb");
        assert_eq!(shape(&root), owned(&[("a", 0), ("b", 0)]));
    }

    #[test]
    fn test_crlf_input() {
        let root = parse("a\r\n    b = 1\r\n");
        assert_eq!(shape(&root), owned(&[("a", 0), ("b", 1)]));
        assert_eq!(root.locate("a/b").unwrap().value(), Some("1"));
    }
}
