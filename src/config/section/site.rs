//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Ruby Lin"
//! author = "Ruby Lin"
//! description = "Motion design and creative coding"
//! url = "https://ruby.github.io/folio/"   # optional, sets the path prefix
//! background = "/background.jpg"          # optional page background
//!
//! [[site.links]]
//! label = "Resume"
//! href = "/resume.pdf"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata and sidebar links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Brand name in the sidebar and `<title>`.
    pub title: String,
    /// Name in the footer copyright line. Falls back to `title`.
    pub author: String,
    pub description: String,
    /// `<html lang>` value.
    pub lang: String,
    /// Deployed URL. Its path component becomes the URL prefix.
    pub url: Option<String>,
    /// Public path of the page background image.
    pub background: Option<String>,
    /// External links under the nav menu.
    pub links: Vec<LinkConfig>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            lang: "en".to_string(),
            url: None,
            background: None,
            links: Vec::new(),
        }
    }
}

/// A sidebar link that opens in a new tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub href: String,
}

impl SiteSectionConfig {
    /// Name shown after the copyright sign.
    pub fn author_name(&self) -> &str {
        if self.author.is_empty() {
            &self.title
        } else {
            &self.author
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(FieldPath::new("site.title"), "must not be empty");
        }

        if let Some(url) = &self.url
            && url::Url::parse(url).is_err()
        {
            diag.error_with_hint(
                FieldPath::new("site.url"),
                format!("`{url}` is not an absolute URL"),
                "use a full URL such as `https://name.github.io/folio/`",
            );
        }

        let links = FieldPath::new("site");
        for (i, link) in self.links.iter().enumerate() {
            let path = links.join_index("links", i);
            if link.label.trim().is_empty() {
                diag.error(path.join("label"), "must not be empty");
            }
            if link.href.trim().is_empty() {
                diag.error(path.join("href"), "must not be empty");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_site_config() {
        let config = test_parse_config(
            "[[site.links]]\nlabel = \"Github\"\nhref = \"https://github.com/ruby\"",
        );
        assert_eq!(config.site.title, "Test");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.site.links.len(), 1);
        assert_eq!(config.site.links[0].label, "Github");
    }

    #[test]
    fn test_author_falls_back_to_title() {
        let mut config = test_parse_config("");
        assert_eq!(config.site.author_name(), "Test");
        config.site.author = "Ruby Lin".into();
        assert_eq!(config.site.author_name(), "Ruby Lin");
    }

    #[test]
    fn test_site_validation() {
        let mut config = test_parse_config(
            "[[site.links]]\nlabel = \"\"\nhref = \"/resume.pdf\"",
        );
        config.site.title = " ".into();
        config.site.url = Some("not a url".into());

        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["site.title", "site.url", "site.links[0].label"]);
    }
}
