//! Value decoding: trimming, comment stripping, and quote removal.

/// Decode a raw value into its final text.
///
/// In order: surrounding whitespace is trimmed, an unquoted trailing `#`
/// comment is cut off, and one matching pair of surrounding quotes is
/// stripped. The text between stripped quotes is returned verbatim,
/// including any `#` or quote characters of the other kind.
///
/// An empty result is a real value; "no value at all" is represented one
/// level up, by the absence of a raw value on the line.
pub fn decode_value(raw: &str) -> String {
    let text = raw.trim_matches([' ', '\t', '\r', '\n']);

    // Find the first `#` outside quotes. Each quote character toggles its
    // own state only while the other state is inactive, and an
    // unterminated quote keeps its state set for the rest of the scan, so
    // a `#` after it is never treated as a comment.
    let mut in_single = false;
    let mut in_double = false;
    let mut cut = text.len();
    for (idx, c) in text.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => {
                cut = idx;
                break;
            }
            _ => {}
        }
    }
    let text = text[..cut].trim_end_matches([' ', '\t']);

    // Strip exactly one outer quote pair when it spans the whole text.
    let bytes = text.as_bytes();
    if bytes.len() >= 2
        && matches!(bytes[0], b'\'' | b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}
