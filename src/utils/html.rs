//! HTML utility functions.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `class_list()` - Join optional class names into one attribute value
//! - `seconds()` - Compact CSS time values

use std::borrow::Cow;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

/// Escape HTML attribute values.
///
/// Identical to `escape()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// Attribute helpers
// =============================================================================

/// Join the present class names with single spaces.
///
/// ```ignore
/// assert_eq!(class_list(&[Some("a"), None, Some("b")]), "a b");
/// ```
pub fn class_list(classes: &[Option<&str>]) -> String {
    classes
        .iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format seconds for CSS (`0.16s`, `3.6s`, `0s`), dropping float noise.
pub fn seconds(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert!(matches!(escape("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
        assert_eq!(escape("Wei's & co"), "Wei&#39;s &amp; co");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
    }

    #[test]
    fn test_class_list() {
        assert_eq!(class_list(&[Some("a"), None, Some("b")]), "a b");
        assert_eq!(class_list(&[None, Some("")]), "");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(3.6), "3.6s");
        assert_eq!(seconds(0.08 * 2.0), "0.16s");
        assert_eq!(seconds(0.0), "0s");
        assert_eq!(seconds(2.0), "2s");
    }
}
