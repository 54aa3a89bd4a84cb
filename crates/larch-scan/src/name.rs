//! Key name validation.

/// Check if a character may appear in a key name.
///
/// Keys are ASCII letters, digits, and the marks `$ - _ @ . & + /`.
#[inline]
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '$' | '-' | '_' | '@' | '.' | '&' | '+' | '/')
}

/// Check if `name` is a legal key: non-empty and built only from name
/// characters. Whitespace, `=`, `#`, and `*` all disqualify the whole
/// name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}
