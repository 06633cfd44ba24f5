//! Pre-initialization checks on the target directory.

use anyhow::{Result, bail};
use std::path::Path;

use super::config::{ABOUT_FILE, CONFIG_FILE};

/// Where `folio init` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// `folio init`: the current directory, which may already hold files
    CurrentDir,
    /// `folio init <name>`: a fresh subdirectory
    NewDir,
}

impl InitMode {
    pub const fn from_name(has_name: bool) -> Self {
        if has_name { Self::NewDir } else { Self::CurrentDir }
    }
}

/// Refuse targets that would lose or clash with existing files.
///
/// - `CurrentDir`: no `folio.toml` yet, and `public_dir` is not a file
/// - `NewDir`: the directory must not exist
pub fn validate_target(root: &Path, mode: InitMode, public_dir: &Path) -> Result<()> {
    match mode {
        InitMode::CurrentDir => {
            if root.join(CONFIG_FILE).exists() {
                bail!(
                    "'{CONFIG_FILE}' already exists.\n\
                     Use `folio init <name>` to start a portfolio in a new subdirectory."
                );
            }
            let public = root.join(public_dir);
            if public.is_file() {
                bail!(
                    "'{}' is a file, but the public directory is created there.",
                    public.display()
                );
            }
        }
        InitMode::NewDir => {
            if root.exists() {
                bail!(
                    "Directory '{}' already exists.\n\
                     Choose a different name or run `folio init` inside it.",
                    root.display()
                );
            }
        }
    }
    Ok(())
}

/// Starter files already present, which init leaves untouched.
pub fn kept_files(root: &Path) -> Vec<&'static str> {
    [ABOUT_FILE, ".gitignore"]
        .into_iter()
        .filter(|name| root.join(name).exists())
        .collect()
}
