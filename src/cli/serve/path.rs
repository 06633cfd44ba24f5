//! URL to filesystem path resolution.

use std::path::{Component, Path, PathBuf};

/// Resolve a request URL to a file under `serve_root`.
///
/// `prefix` is stripped first when the server keeps the deployment prefix.
/// Directories resolve to their `index.html`.
pub fn resolve_path(url: &str, serve_root: &Path, prefix: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);
    let clean = strip_prefix(&clean, prefix)?;

    // Parent segments are refused; `a..b.jpg` is an ordinary name
    if Path::new(clean)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return None;
    }

    let local = serve_root.join(clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string and fragment, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();
    decoded.trim_matches('/').to_string()
}

/// `folio/img/a.jpg` -> `img/a.jpg` for prefix `folio`. URLs outside the
/// prefix do not resolve.
fn strip_prefix<'a>(path: &'a str, prefix: &Path) -> Option<&'a str> {
    let prefix = prefix.to_str()?.trim_matches('/');
    if prefix.is_empty() {
        return Some(path);
    }
    match path.strip_prefix(prefix) {
        Some("") => Some(""),
        Some(rest) => rest.strip_prefix('/'),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("index.html"), "<html>").unwrap();
        fs::write(dir.path().join("img/a b.jpg"), "jpeg").unwrap();
        dir
    }

    #[test]
    fn test_root_resolves_to_index() {
        let dir = site();
        let path = resolve_path("/", dir.path(), Path::new("")).unwrap();
        assert!(path.ends_with("index.html"));
        let path = resolve_path("/?utm=x#about", dir.path(), Path::new("")).unwrap();
        assert!(path.ends_with("index.html"));
    }

    #[test]
    fn test_percent_decoding() {
        let dir = site();
        let path = resolve_path("/img/a%20b.jpg", dir.path(), Path::new("")).unwrap();
        assert!(path.ends_with("img/a b.jpg"));
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = site();
        assert!(resolve_path("/../etc/passwd", dir.path(), Path::new("")).is_none());
        assert!(resolve_path("/img/%2e%2e/%2e%2e/x", dir.path(), Path::new("")).is_none());
    }

    #[test]
    fn test_double_dots_inside_names_allowed() {
        let dir = site();
        fs::write(dir.path().join("img/a..b.jpg"), "jpeg").unwrap();
        let path = resolve_path("/img/a..b.jpg", dir.path(), Path::new("")).unwrap();
        assert!(path.ends_with("img/a..b.jpg"));
        assert!(resolve_path("/img/../index.html", dir.path(), Path::new("")).is_none());
    }

    #[test]
    fn test_prefix() {
        let dir = site();
        let prefix = Path::new("folio");
        assert!(resolve_path("/folio/", dir.path(), prefix).is_some());
        assert!(resolve_path("/folio/img/a%20b.jpg", dir.path(), prefix).is_some());
        assert!(resolve_path("/img/a%20b.jpg", dir.path(), prefix).is_none());
        assert!(resolve_path("/foliox/index.html", dir.path(), prefix).is_none());
    }
}
