//! Reference extraction for validation.

use pulldown_cmark::{Event, Parser, Tag};

use crate::config::is_external;

/// A link extracted from markdown content
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLink {
    /// Link destination.
    pub dest: String,
    /// `link` or `image`.
    pub attr: &'static str,
}

/// Where a reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind<'a> {
    /// Another site (`https://`, `mailto:`, `//cdn`).
    External,
    /// A section anchor on the page (`#about`).
    Fragment(&'a str),
    /// A file under the public directory, query and fragment stripped.
    Public(&'a str),
}

impl<'a> RefKind<'a> {
    pub fn parse(dest: &'a str) -> Self {
        if is_external(dest) || dest.starts_with("mailto:") || dest.starts_with("tel:") {
            return Self::External;
        }
        if let Some(id) = dest.strip_prefix('#') {
            return Self::Fragment(id);
        }
        let path = dest.split(['?', '#']).next().unwrap_or(dest);
        Self::Public(path.trim_start_matches('/'))
    }
}

/// Collect link and image destinations from markdown.
pub fn scan_markdown(source: &str) -> Vec<ScannedLink> {
    Parser::new(source)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(ScannedLink {
                dest: dest_url.into_string(),
                attr: "link",
            }),
            Event::Start(Tag::Image { dest_url, .. }) => Some(ScannedLink {
                dest: dest_url.into_string(),
                attr: "image",
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_markdown() {
        let links = scan_markdown(
            "See [cv](/resume.pdf) and ![me](me.jpg \"Me\").\n\n[gh](https://github.com)",
        );
        let dests: Vec<_> = links.iter().map(|l| (l.dest.as_str(), l.attr)).collect();
        assert_eq!(
            dests,
            [
                ("/resume.pdf", "link"),
                ("me.jpg", "image"),
                ("https://github.com", "link")
            ]
        );
    }

    #[test]
    fn test_ref_kind() {
        assert_eq!(RefKind::parse("https://a.b/c"), RefKind::External);
        assert_eq!(RefKind::parse("mailto:me@a.b"), RefKind::External);
        assert_eq!(RefKind::parse("#about"), RefKind::Fragment("about"));
        assert_eq!(RefKind::parse("/img/a.jpg?v=2"), RefKind::Public("img/a.jpg"));
        assert_eq!(RefKind::parse("cv.pdf#page=2"), RefKind::Public("cv.pdf"));
    }
}
