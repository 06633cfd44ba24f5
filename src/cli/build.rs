//! Site building.
//!
//! Build phases:
//! - **Init** - Registry from `[[sections]]`, optional clean of the output dir
//! - **Render** - `index.html` with every section in registry order
//! - **Embed** - Runtime script and stylesheet under `/.folio/`
//! - **Public** - Copy the public directory, skipping up-to-date files

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::SiteConfig,
    core::is_shutdown,
    debug,
    embed::{ASSET_DIR, write_embedded_assets},
    log,
    logger::Progress,
    render::render_page,
    section::Registry,
};

/// Editor and OS artifacts never copied from the public directory.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Outcome of one build.
#[derive(Debug)]
pub struct BuildReport {
    pub registry: Arc<Registry>,
    /// Public files copied (stale or missing in the output).
    pub copied: usize,
    /// Public files already up to date.
    pub skipped: usize,
}

/// Build the whole site into `build.output`.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildReport> {
    let registry = Arc::new(config.registry().context("Invalid section list")?);
    let output = config.paths().output_dir();

    prepare_output(config, &output)?;

    let html = render_page(config, &registry)?;
    let index = output.join("index.html");
    fs::write(&index, html).with_context(|| format!("Failed to write {}", index.display()))?;
    debug!("build"; "rendered {} sections", registry.len());

    write_embedded_assets(config, &registry, &output)?;

    let files = collect_public_files(&config.build.public);
    let (copied, skipped) = copy_public(config, &files, quiet)?;

    if !quiet {
        log!("build"; "{} sections, {} public files copied -> {}",
            registry.len(), copied, output.display());
    }

    Ok(BuildReport {
        registry,
        copied,
        skipped,
    })
}

/// Create the output directory, clearing it first on `--clean`.
fn prepare_output(config: &SiteConfig, output: &Path) -> Result<()> {
    if config.build.clean && output.exists() {
        // Never wipe a directory that contains the project itself
        if crate::utils::path::is_within(config.get_root(), output) {
            bail!(
                "refusing to clean {}: it contains the project root",
                output.display()
            );
        }
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
        debug!("build"; "cleaned {}", output.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    Ok(())
}

/// All regular files under the public directory (empty when it is missing).
pub fn collect_public_files(public: &Path) -> Vec<PathBuf> {
    if !public.is_dir() {
        return Vec::new();
    }
    WalkDir::new(public)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect()
}

/// Copy public files in parallel. Returns `(copied, skipped)`.
fn copy_public(config: &SiteConfig, files: &[PathBuf], quiet: bool) -> Result<(usize, usize)> {
    if files.is_empty() {
        return Ok((0, 0));
    }

    let progress = (!quiet).then(|| Progress::new("public", files.len()));
    let results: Vec<Result<bool>> = files
        .par_iter()
        .map(|source| {
            if is_shutdown() {
                return Ok(false);
            }
            let copied = copy_public_file(config, source)?;
            if let Some(progress) = &progress {
                progress.inc();
            }
            Ok(copied)
        })
        .collect();

    if let Some(progress) = progress {
        progress.finish();
    }

    let mut copied = 0;
    for result in results {
        if result? {
            copied += 1;
        }
    }
    Ok((copied, files.len() - copied))
}

/// Copy one public file. Returns false when the output is already current or
/// the file would shadow a generated one.
fn copy_public_file(config: &SiteConfig, source: &Path) -> Result<bool> {
    let relative = source
        .strip_prefix(&config.build.public)
        .with_context(|| format!("{} is outside the public directory", source.display()))?;

    if is_reserved(relative) {
        log!("warning"; "public/{} shadows a generated file, skipped", relative.display());
        return Ok(false);
    }

    let target = config.paths().output_dir().join(relative);
    if !config.build.clean && !is_stale(source, &target) {
        return Ok(false);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, &target)
        .with_context(|| format!("Failed to copy {}", source.display()))?;
    Ok(true)
}

/// Output paths owned by the generator.
fn is_reserved(relative: &Path) -> bool {
    relative == Path::new("index.html") || relative.starts_with(ASSET_DIR)
}

/// Whether `target` is missing or older than `source`.
fn is_stale(source: &Path, target: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
    match (modified(source), modified(target)) {
        (Some(src), Some(dst)) => src > dst,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    const SECTIONS: &str = r#"
[[sections]]
id = "top"
nav = "Home"
[sections.body]
kind = "hero"
text = "Hello"

[[sections]]
id = "gallery"
nav = "Gallery"
[sections.body]
kind = "gallery"
items = [{ src = "/img/a.jpg", alt = "A" }]
"#;

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("public/img")).unwrap();
        fs::write(root.join("public/img/a.jpg"), b"jpeg").unwrap();
        fs::write(root.join("public/.DS_Store"), b"junk").unwrap();

        let mut config = test_parse_config(SECTIONS);
        config.build.output = root.join("dist");
        config.build.public = root.join("public");
        config.root = root;
        (dir, config)
    }

    #[test]
    fn test_build_writes_page_assets_and_public() {
        let (_dir, config) = setup();
        let report = build_site(&config, true).unwrap();
        let output = &config.build.output;

        assert_eq!(report.registry.len(), 2);
        assert_eq!(report.copied, 1);
        assert!(output.join("index.html").is_file());
        assert_eq!(fs::read(output.join("img/a.jpg")).unwrap(), b"jpeg");
        assert!(!output.join(".DS_Store").exists());

        let embedded: Vec<_> = fs::read_dir(output.join(ASSET_DIR))
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(embedded.iter().any(|n| n.starts_with("runtime-") && n.ends_with(".js")));
        assert!(embedded.iter().any(|n| n.starts_with("site-") && n.ends_with(".css")));
    }

    #[test]
    fn test_second_build_skips_fresh_files() {
        let (_dir, config) = setup();
        build_site(&config, true).unwrap();
        let report = build_site(&config, true).unwrap();
        assert_eq!(report.copied, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let (_dir, mut config) = setup();
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("old.txt"), b"old").unwrap();

        config.build.clean = true;
        build_site(&config, true).unwrap();
        assert!(!config.build.output.join("old.txt").exists());
    }

    #[test]
    fn test_rebuild_after_clearing_clean_flag_keeps_output() {
        let (_dir, mut config) = setup();
        config.build.clean = true;
        let output = config.build.output.clone();

        crate::config::init_config(config);
        build_site(&crate::config::cfg(), true).unwrap();
        fs::write(output.join("marker.txt"), b"served").unwrap();

        crate::config::clear_clean_flag();
        assert!(!crate::config::cfg().build.clean);
        let report = build_site(&crate::config::cfg(), true).unwrap();

        assert!(output.join("marker.txt").is_file());
        assert_eq!(report.copied, 0);
    }

    #[test]
    fn test_clean_refuses_project_root() {
        let (_dir, mut config) = setup();
        config.build.output = config.root.clone();
        config.build.clean = true;
        assert!(build_site(&config, true).is_err());
        assert!(config.root.join("public/img/a.jpg").exists());
    }

    #[test]
    fn test_reserved_paths() {
        assert!(is_reserved(Path::new("index.html")));
        assert!(is_reserved(Path::new(".folio/runtime-00000000.js")));
        assert!(!is_reserved(Path::new("img/index.html")));
    }

    #[test]
    fn test_missing_public_dir() {
        let dir = TempDir::new().unwrap();
        assert!(collect_public_files(&dir.path().join("nope")).is_empty());
    }
}
