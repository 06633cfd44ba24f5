//! Config field paths used in diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path to a config field, e.g. `sections[2].body.videos[0].id`.
///
/// Static paths borrow; indexed paths into `[[sections]]` arrays own their
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of element `index` in an array of tables.
    pub fn index(array: &str, index: usize) -> Self {
        Self(Cow::Owned(format!("{array}[{index}]")))
    }

    /// Append a child key.
    pub fn join(&self, key: &str) -> Self {
        Self(Cow::Owned(format!("{}.{key}", self.0)))
    }

    /// Append an indexed child array element.
    pub fn join_index(&self, key: &str, index: usize) -> Self {
        Self(Cow::Owned(format!("{}.{key}[{index}]", self.0)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_building() {
        let section = FieldPath::index("sections", 2);
        assert_eq!(section.as_str(), "sections[2]");
        assert_eq!(section.join("id").as_str(), "sections[2].id");
        assert_eq!(
            section.join("body").join_index("videos", 0).join("id").as_str(),
            "sections[2].body.videos[0].id"
        );
        assert_eq!(FieldPath::new("site.title").as_str(), "site.title");
    }
}
