//! Section registry: the ordered, immutable list of page sections.
//!
//! Both the sidebar renderer and the content renderer read from the same
//! [`Registry`], so anchors and nav entries always agree on ids and order.
//! The active-section tracker uses the registry ids as its vocabulary.

mod registry;

pub use registry::{Registry, RegistryError};

use serde::{Deserialize, Serialize};

/// Visual variant of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    /// Inverted color scheme (dark background, light text).
    Dark,
}

impl Theme {
    /// Extra CSS class applied to the section element.
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("section-dark"),
        }
    }
}

/// One full-viewport content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// DOM anchor and tracker identifier.
    pub id: String,
    /// Short label for the navigation menu.
    pub nav: String,
    /// Heading rendered inside the section.
    pub title: String,
    pub theme: Theme,
}

impl Section {
    pub fn new(id: impl Into<String>, nav: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nav: nav.into(),
            title: title.into(),
            theme: Theme::Light,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Fragment link used by the sidebar (`#id`).
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}
