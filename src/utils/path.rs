//! Path normalization.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to returning absolute paths as-is and joining relative paths
/// with the current directory, so paths that do not exist yet (the output
/// directory before the first build) still normalize.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Whether `path` lies inside `dir` (both normalized).
pub fn is_within(path: &Path, dir: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let normalized = normalize_path(Path::new("/absolute/does-not-exist/file.txt"));
        assert_eq!(normalized, PathBuf::from("/absolute/does-not-exist/file.txt"));
    }

    #[test]
    fn test_normalize_path_relative() {
        assert!(normalize_path(Path::new("relative/path/file.txt")).is_absolute());
    }

    #[test]
    fn test_is_within() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("dist");
        std::fs::create_dir(&inner).unwrap();
        assert!(is_within(&inner, dir.path()));
        assert!(!is_within(dir.path(), &inner));
    }
}
