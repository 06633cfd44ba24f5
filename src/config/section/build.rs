//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"     # Generated site
//! public = "public"   # Static files copied verbatim (images, models, pdfs)
//! clean = false       # Remove the output directory before building
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build paths. Relative paths are resolved against the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    pub output: PathBuf,
    pub public: PathBuf,
    pub clean: bool,

    /// URL prefix derived from `site.url` (internal use only).
    #[serde(skip)]
    pub path_prefix: PathBuf,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            public: "public".into(),
            clean: false,
            path_prefix: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::Path;

    #[test]
    fn test_build_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, Path::new("dist"));
        assert_eq!(config.build.public, Path::new("public"));
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_config_override() {
        let config = test_parse_config("[build]\noutput = \"site\"\nclean = true");
        assert_eq!(config.build.output, Path::new("site"));
        assert!(config.build.clean);
    }
}
