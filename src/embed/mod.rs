//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template trait for typed variable injection
//! - `asset` - Embedded asset type with content-hash filenames
//! - `page` - Page runtime (JS) and stylesheet, minified by `build.rs`
//!
//! # Usage
//!
//! ```ignore
//! use embed::page::{RUNTIME_JS, RuntimeVars};
//!
//! let vars = RuntimeVars::from_config(&config, &registry);
//! let url = RUNTIME_JS.url_path_with_vars(&vars);
//! ```

mod asset;
mod template;

pub use asset::{ASSET_DIR, AssetKind, EmbeddedAsset};
pub use template::{TemplateVars, inject_json};

pub mod page {
    use super::{AssetKind, EmbeddedAsset, TemplateVars, inject_json};
    use crate::config::SiteConfig;
    use crate::section::Registry;
    use serde_json::json;

    /// Variables for the page runtime.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RuntimeVars {
        /// Section ids in registry order.
        pub sections: Vec<String>,
        pub root_margin: String,
        pub thresholds: Vec<f64>,
    }

    impl RuntimeVars {
        pub fn from_config(config: &SiteConfig, registry: &Registry) -> Self {
            let options = config.observer_options();
            Self {
                sections: registry.ids().map(str::to_string).collect(),
                root_margin: options.root_margin.to_string(),
                thresholds: options.thresholds,
            }
        }
    }

    impl TemplateVars for RuntimeVars {
        fn apply(&self, content: &str) -> String {
            inject_json(
                content,
                &[
                    ("__FOLIO_SECTIONS__", json!(self.sections)),
                    ("__FOLIO_ROOT_MARGIN__", json!(self.root_margin)),
                    ("__FOLIO_THRESHOLDS__", json!(self.thresholds)),
                ],
            )
        }

        fn hash_input(&self) -> String {
            format!(
                "{}|{}|{:?}",
                self.sections.join(","),
                self.root_margin,
                self.thresholds
            )
        }
    }

    /// Tracker, gates, modal and sidebar behavior.
    pub const RUNTIME_JS: EmbeddedAsset<RuntimeVars> = EmbeddedAsset::new(
        AssetKind::JavaScript,
        "runtime",
        include_str!(concat!(env!("OUT_DIR"), "/runtime.min.js")),
    );

    /// Page layout and widget styles.
    pub const SITE_CSS: EmbeddedAsset<()> = EmbeddedAsset::new(
        AssetKind::Css,
        "site",
        include_str!(concat!(env!("OUT_DIR"), "/site.min.css")),
    );
}

// =============================================================================
// Embedded Assets Writer
// =============================================================================

use crate::config::SiteConfig;
use crate::section::Registry;
use anyhow::Result;
use std::path::Path;

/// Write all embedded assets to the output directory, replacing older
/// versions.
pub fn write_embedded_assets(
    config: &SiteConfig,
    registry: &Registry,
    output_dir: &Path,
) -> Result<()> {
    use page::{RUNTIME_JS, RuntimeVars, SITE_CSS};

    std::fs::create_dir_all(output_dir)?;

    SITE_CSS.cleanup_old(output_dir)?;
    SITE_CSS.write_with_vars(output_dir, &())?;

    let vars = RuntimeVars::from_config(config, registry);
    RUNTIME_JS.cleanup_old(output_dir)?;
    RUNTIME_JS.write_with_vars(output_dir, &vars)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::page::*;
    use super::*;
    use crate::section::Section;

    fn registry() -> Registry {
        Registry::new(vec![
            Section::new("top", "Home", "Hi"),
            Section::new("about", "About", "About"),
        ])
        .unwrap()
    }

    #[test]
    fn test_runtime_vars_injected() {
        let config = SiteConfig::default();
        let vars = RuntimeVars::from_config(&config, &registry());
        assert_eq!(vars.sections, ["top", "about"]);
        assert_eq!(vars.root_margin, "-50% 0px -40% 0px");

        let rendered = RUNTIME_JS.render(&vars);
        assert!(rendered.contains(r#"["top","about"]"#));
        assert!(rendered.contains(r#""-50% 0px -40% 0px""#));
        assert!(rendered.contains("[0.0,0.25,0.5,0.75,1.0]"));
        assert!(!rendered.contains("__FOLIO_"));
    }

    #[test]
    fn test_runtime_url_tracks_sections() {
        let config = SiteConfig::default();
        let a = RuntimeVars::from_config(&config, &registry());
        let mut b = a.clone();
        b.sections.reverse();

        let url = RUNTIME_JS.url_path_with_vars(&a);
        assert!(url.starts_with("/.folio/runtime-"));
        assert!(url.ends_with(".js"));
        assert_ne!(url, RUNTIME_JS.url_path_with_vars(&b));
    }

    #[test]
    fn test_write_embedded_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let registry = registry();

        write_embedded_assets(&config, &registry, dir.path()).unwrap();
        // A second build replaces rather than accumulates
        write_embedded_assets(&config, &registry, dir.path()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path().join(ASSET_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.starts_with("site-") && n.ends_with(".css")));
        assert!(names.iter().any(|n| n.starts_with("runtime-") && n.ends_with(".js")));
    }
}
