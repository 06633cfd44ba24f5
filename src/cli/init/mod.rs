//! Portfolio initialization.
//!
//! # Module Structure
//!
//! - [`validate`]: Pre-initialization checks
//! - [`config`]: Starter config, content and ignore files

mod config;
mod validate;

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::fs;

pub use validate::InitMode;

/// Create a new portfolio
///
/// # Steps
/// 1. Validate target directory
/// 2. Write folio.toml
/// 3. Create the public directory and starter biography
/// 4. Write ignore files
pub fn new_site(site_config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = site_config.get_root();
    let mode = InitMode::from_name(has_name);
    let public = site_config.root_relative(&site_config.build.public);

    validate::validate_target(root, mode, &public)?;
    let kept = validate::kept_files(root);

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create root directory '{}'", root.display()))?;

    let title = root
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("My Portfolio");
    config::write_config(root, title)?;
    config::write_content(root, &public)?;

    let output = site_config.root_relative(&site_config.build.output);
    config::write_ignore_files(root, &output)?;

    for name in kept {
        log!("init"; "kept existing {}", name);
    }
    log!("init"; "portfolio initialized in {}", root.display());
    Ok(())
}
