//! Starter files for a new portfolio.
//!
//! Creates folio.toml, the public directory, a biography and ignore files.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Default config filename
pub const CONFIG_FILE: &str = "folio.toml";

/// Biography referenced by the starter `about` section
pub const ABOUT_FILE: &str = "about.md";

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const ABOUT_TEMPLATE: &str = "\
I design and build interactive things for the web.

Replace this text in `about.md`. Links like [my resume](/resume.pdf) resolve
against the public directory.
";

/// Generate folio.toml content with comments
pub fn generate_config_template(title: &str) -> String {
    let title = title.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        r##"# folio configuration file (v{version})

[site]
title = "{title}"
description = "Portfolio of {title}"
# author = "{title}"
# url = "https://example.github.io/portfolio/"
# background = "/graphics/background.jpg"

# [[site.links]]
# label = "GitHub"
# href = "https://github.com/example"

# Sections appear on the page and in the sidebar in this order.

[[sections]]
id = "top"
nav = "Home"
[sections.body]
kind = "hero"
text = "{title}"
subtitle = "Designer and developer"

[[sections]]
id = "about"
nav = "About"
theme = "dark"
[sections.body]
kind = "text"
file = "{about}"

# [[sections]]
# id = "videos"
# nav = "Videos"
# [sections.body]
# kind = "videos"
# columns = 2
# videos = [{{ id = "dQw4w9WgXcQ", title = "Showreel" }}]

# [[sections]]
# id = "gallery"
# nav = "Gallery"
# [sections.body]
# kind = "gallery"
# items = [{{ src = "/graphics/one.jpg", alt = "First piece" }}]

[tracker]
root_margin = "-50% 0px -40% 0px"
thresholds = [0.0, 0.25, 0.5, 0.75, 1.0]

[build]
output = "dist"
public = "public"

[serve]
interface = "127.0.0.1"
port = 5277
watch = true
"##,
        version = env!("CARGO_PKG_VERSION"),
        title = title,
        about = ABOUT_FILE,
    )
}

/// Write default folio.toml configuration
pub fn write_config(root: &Path, title: &str) -> Result<()> {
    let content = generate_config_template(title);

    let path = root.join(CONFIG_FILE);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Write the public directory and the starter biography.
pub fn write_content(root: &Path, public_dir: &Path) -> Result<()> {
    let public = root.join(public_dir);
    fs::create_dir_all(&public)
        .with_context(|| format!("Failed to create directory '{}'", public.display()))?;

    let about = root.join(ABOUT_FILE);
    if !about.exists() {
        fs::write(&about, ABOUT_TEMPLATE)
            .with_context(|| format!("Failed to write '{}'", about.display()))?;
    }
    Ok(())
}

/// Write .gitignore and .ignore files with standard patterns
///
/// Patterns include:
/// - Output directory (e.g., `/dist/`)
/// - OS-specific files (`.DS_Store`)
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let patterns = [
        output_pattern.to_string_lossy().into_owned(),
        ".DS_Store".to_string(),
    ];

    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigDiagnostics, SiteConfig};
    use tempfile::TempDir;

    #[test]
    fn test_template_is_valid_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "Ada \"Countess\" Lovelace").unwrap();
        write_content(temp.path(), Path::new("public")).unwrap();

        let content = fs::read_to_string(temp.path().join(CONFIG_FILE)).unwrap();
        let mut config = SiteConfig::from_str(&content).unwrap();
        config.root = temp.path().to_path_buf();
        assert_eq!(config.site.title, "Ada \"Countess\" Lovelace");
        assert_eq!(config.sections.len(), 2);

        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        crate::config::section::sections::validate_sections(
            &config.sections,
            &config.root,
            &mut diag,
        );
        config.tracker.validate(&mut diag);
        assert!(!diag.has_errors(), "{diag}");
    }

    #[test]
    fn test_write_content() {
        let temp = TempDir::new().unwrap();
        write_content(temp.path(), Path::new("public")).unwrap();
        assert!(temp.path().join("public").is_dir());
        assert!(temp.path().join(ABOUT_FILE).is_file());
    }

    #[test]
    fn test_write_ignore_files() {
        let temp = TempDir::new().unwrap();
        write_ignore_files(temp.path(), Path::new("dist")).unwrap();

        let content = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert!(content.contains("/dist"));
    }

    #[test]
    fn test_ignore_files_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        fs::write(&gitignore, "custom content").unwrap();

        write_ignore_files(temp.path(), Path::new("dist")).unwrap();

        let content = fs::read_to_string(&gitignore).unwrap();
        assert_eq!(content, "custom content");
    }
}
