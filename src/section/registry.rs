use super::Section;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Section ids double as DOM ids and fragment links.
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid id pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("section registry is empty")]
    Empty,

    #[error("duplicate section id `{0}`")]
    DuplicateId(String),

    #[error("invalid section id `{0}` (expected letters, digits, `_` or `-`)")]
    InvalidId(String),

    #[error("section `{0}` has an empty nav label")]
    EmptyNav(String),
}

/// Ordered, immutable section list with id lookup.
///
/// Construction is the only place invariants are checked; once built the
/// registry is never mutated.
#[derive(Debug, Clone)]
pub struct Registry {
    sections: Vec<Section>,
    index: FxHashMap<String, usize>,
}

impl Registry {
    pub fn new(sections: Vec<Section>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = FxHashMap::default();
        for (pos, section) in sections.iter().enumerate() {
            if !ID_PATTERN.is_match(&section.id) {
                return Err(RegistryError::InvalidId(section.id.clone()));
            }
            if section.nav.trim().is_empty() {
                return Err(RegistryError::EmptyNav(section.id.clone()));
            }
            if index.insert(section.id.clone(), pos).is_some() {
                return Err(RegistryError::DuplicateId(section.id.clone()));
            }
        }

        Ok(Self { sections, index })
    }

    /// Check an id against the naming rule without building a registry.
    pub fn is_valid_id(id: &str) -> bool {
        ID_PATTERN.is_match(id)
    }

    /// First section; also the tracker's initial active section.
    pub fn first(&self) -> &Section {
        &self.sections[0]
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.position(id).map(|pos| &self.sections[pos])
    }

    pub fn at(&self, pos: usize) -> Option<&Section> {
        self.sections.get(pos)
    }

    /// Registry order of `id`, used as the tie-break during selection.
    #[inline]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// True when both registries list the same ids in the same order.
    pub fn same_ids(&self, other: &Registry) -> bool {
        self.ids().eq(other.ids())
    }
}

impl std::ops::Index<usize> for Registry {
    type Output = Section;

    fn index(&self, pos: usize) -> &Section {
        &self.sections[pos]
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Theme;

    fn sample() -> Vec<Section> {
        vec![
            Section::new("top", "Top", "Portfolio"),
            Section::new("about", "About", "About").with_theme(Theme::Dark),
            Section::new("2d_animation", "2D Animation", "2D Animation"),
        ]
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let registry = Registry::new(sample()).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.first().id, "top");
        assert_eq!(registry.position("about"), Some(1));
        assert_eq!(registry.get("about").unwrap().theme, Theme::Dark);
        assert!(registry.contains("2d_animation"));
        assert!(!registry.contains("missing"));
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            ["top", "about", "2d_animation"]
        );
    }

    #[test]
    fn test_registry_rejects_empty() {
        assert_eq!(Registry::new(Vec::new()).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn test_registry_rejects_duplicate_id() {
        let mut sections = sample();
        sections.push(Section::new("about", "Again", "Again"));

        assert_eq!(
            Registry::new(sections).unwrap_err(),
            RegistryError::DuplicateId("about".into())
        );
    }

    #[test]
    fn test_registry_rejects_bad_id() {
        for bad in ["", "has space", "-leading", "a#b"] {
            let err = Registry::new(vec![Section::new(bad, "Nav", "Title")]).unwrap_err();
            assert_eq!(err, RegistryError::InvalidId(bad.into()));
        }
    }

    #[test]
    fn test_registry_rejects_blank_nav() {
        let err = Registry::new(vec![Section::new("top", "  ", "Title")]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyNav("top".into()));
    }

    #[test]
    fn test_same_ids() {
        let a = Registry::new(sample()).unwrap();
        let mut renamed = sample();
        renamed[0].title = "Renamed".into();
        let b = Registry::new(renamed).unwrap();
        let c = Registry::new(sample().into_iter().rev().collect()).unwrap();

        assert!(a.same_ids(&b));
        assert!(!a.same_ids(&c));
    }

    #[test]
    fn test_theme_class() {
        assert_eq!(Theme::Light.class(), None);
        assert_eq!(Theme::Dark.class(), Some("section-dark"));
    }
}
