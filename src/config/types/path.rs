//! Output paths and public URLs under an optional deployment prefix.

use std::path::{Path, PathBuf};

/// Maps public-directory paths to output files and page URLs.
///
/// With `url = "https://me.github.io/folio/"` the prefix is `folio`, so
/// `/graphics/a.jpg` is served as `/folio/graphics/a.jpg` and written to
/// `<output>/graphics/a.jpg`.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    output: &'a Path,
    prefix: &'a Path,
}

impl<'a> PathResolver<'a> {
    pub fn new(output: &'a Path, prefix: &'a Path) -> Self {
        Self { output, prefix }
    }

    /// Root of the generated site on disk.
    pub fn output_dir(&self) -> PathBuf {
        self.output.to_path_buf()
    }

    /// Disk location of a public path (`/a/b.jpg` -> `<output>/a/b.jpg`).
    pub fn output_file(&self, public: &str) -> PathBuf {
        self.output.join(public.trim_start_matches('/'))
    }

    /// Page URL of a public path.
    ///
    /// Absolute URLs (`https://...`, `//cdn...`) and `data:` URIs pass through.
    pub fn url_for(&self, public: &str) -> String {
        if is_external(public) {
            return public.to_string();
        }
        let path = public.trim_start_matches('/');
        let prefix = self.prefix.to_string_lossy();
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("/{path}")
        } else {
            format!("/{prefix}/{path}")
        }
    }
}

/// Whether a reference points outside the site.
pub fn is_external(reference: &str) -> bool {
    reference.starts_with("//") || reference.starts_with("data:") || reference.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_prefix() {
        let paths = PathResolver::new(Path::new("/site/dist"), Path::new(""));
        assert_eq!(paths.url_for("/graphics/a.jpg"), "/graphics/a.jpg");
        assert_eq!(paths.url_for("graphics/a.jpg"), "/graphics/a.jpg");
        assert_eq!(
            paths.output_file("/graphics/a.jpg"),
            PathBuf::from("/site/dist/graphics/a.jpg")
        );
    }

    #[test]
    fn test_url_with_prefix() {
        let paths = PathResolver::new(Path::new("dist"), Path::new("folio"));
        assert_eq!(paths.url_for("/model/shoe.glb"), "/folio/model/shoe.glb");
        assert_eq!(
            paths.output_file("/model/shoe.glb"),
            PathBuf::from("dist/model/shoe.glb")
        );
    }

    #[test]
    fn test_external_urls_pass_through() {
        let paths = PathResolver::new(Path::new("dist"), Path::new("folio"));
        assert_eq!(
            paths.url_for("https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
        assert_eq!(paths.url_for("//cdn.example.com/x.png"), "//cdn.example.com/x.png");
        assert!(is_external("data:image/png;base64,AAAA"));
        assert!(!is_external("/a.png"));
    }
}
