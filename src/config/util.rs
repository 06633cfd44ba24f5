//! Locating `folio.toml` and deriving the deployment prefix.

use std::path::{Path, PathBuf};

/// Deployment prefix taken from `site.url`.
///
/// A portfolio published at `https://ruby.github.io/folio/` lives under
/// `folio`, so every asset URL on the page must carry that prefix. Returns
/// `None` for a site at the domain root or a URL that does not parse.
pub fn deployment_prefix(site_url: &str) -> Option<PathBuf> {
    let parsed = url::Url::parse(site_url).ok()?;
    let path = parsed.path().trim_matches('/');
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Find `config_name`, starting in `start` and walking up to the filesystem
/// root.
///
/// An absolute `config_name` is taken as is when it exists.
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}
