//! Embedded assets written under `/.folio/` with content-hash file names.

use super::TemplateVars;
use crate::utils::hash;
use anyhow::{Context, Result};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Output directory for generated assets, relative to the site root.
pub const ASSET_DIR: &str = ".folio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    JavaScript,
    Css,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Css => "css",
        }
    }
}

/// A minified asset compiled into the binary.
///
/// The file name is `<name>-<hash>.<ext>` where the hash covers both the
/// embedded content and the injected variables, so browsers never keep a
/// stale runtime after the config changes.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            content,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }

    fn filename_with_vars(&self, vars: &V) -> String {
        let input = format!("{}{}", self.content, vars.hash_input());
        format!(
            "{}-{}.{}",
            self.name,
            hash::fingerprint(&input),
            self.kind.extension()
        )
    }

    /// Site-relative path, e.g. `.folio/runtime-1a2b3c4d.js`.
    pub fn relative_path_with_vars(&self, vars: &V) -> String {
        format!("{ASSET_DIR}/{}", self.filename_with_vars(vars))
    }

    /// Root-absolute URL path, e.g. `/.folio/runtime-1a2b3c4d.js`.
    pub fn url_path_with_vars(&self, vars: &V) -> String {
        format!("/{}", self.relative_path_with_vars(vars))
    }

    /// Render and write the asset. Returns the written file.
    pub fn write_with_vars(&self, output_dir: &Path, vars: &V) -> Result<PathBuf> {
        let dir = output_dir.join(ASSET_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create `{}`", dir.display()))?;
        let path = dir.join(self.filename_with_vars(vars));
        fs::write(&path, self.render(vars))
            .with_context(|| format!("Failed to write `{}`", path.display()))?;
        Ok(path)
    }

    /// Remove every previously written version of this asset.
    pub fn cleanup_old(&self, output_dir: &Path) -> Result<usize> {
        let dir = output_dir.join(ASSET_DIR);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Ok(0);
        };

        let prefix = format!("{}-", self.name);
        let suffix = format!(".{}", self.kind.extension());
        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(hash) = file_name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(&suffix))
            else {
                continue;
            };
            if hash.len() == hash::FINGERPRINT_LEN && hash.chars().all(|c| c.is_ascii_hexdigit())
            {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
