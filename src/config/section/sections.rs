//! `[[sections]]` configuration: the ordered page sections.
//!
//! Array order is registry order, DOM order and nav order.
//!
//! # Example
//!
//! ```toml
//! [[sections]]
//! id = "top"
//! nav = "Home"
//! title = "Hi, I'm Ruby"
//! [sections.body]
//! kind = "hero"
//! text = "Motion & Code"
//!
//! [[sections]]
//! id = "about"
//! nav = "About"
//! theme = "dark"
//! [sections.body]
//! kind = "text"
//! file = "about.md"
//!
//! [[sections]]
//! id = "videos"
//! nav = "Motion"
//! [sections.body]
//! kind = "videos"
//! columns = 2
//! [[sections.body.videos]]
//! id = "dQw4w9WgXcQ"
//! title = "Showreel"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, is_external};
use crate::section::{Registry, Section, Theme};
use crate::widget::{GalleryItem, LabEmbed, ModelConfig, Video, WobbleConfig, YouTube};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One `[[sections]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub nav: String,
    /// Heading inside the section. Defaults to the nav label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    pub body: SectionBody,
}

/// Typed section content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SectionBody {
    /// Large wobbling title.
    Hero {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(default)]
        wobble: WobbleConfig,
    },
    /// Markdown prose, inline or from a file relative to the project root.
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        markdown: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<PathBuf>,
    },
    Labs {
        labs: Vec<LabEmbed>,
    },
    Videos {
        videos: Vec<Video>,
        #[serde(default = "default_columns")]
        columns: u8,
    },
    Model(ModelConfig),
    Gallery {
        items: Vec<GalleryItem>,
    },
}

fn default_columns() -> u8 {
    2
}

impl SectionConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.nav)
    }

    pub fn to_section(&self) -> Section {
        Section::new(&self.id, &self.nav, self.title()).with_theme(self.theme)
    }
}

impl SectionBody {
    /// Short name used in logs and diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Hero { .. } => "hero",
            Self::Text { .. } => "text",
            Self::Labs { .. } => "labs",
            Self::Videos { .. } => "videos",
            Self::Model(_) => "model",
            Self::Gallery { .. } => "gallery",
        }
    }

    /// Markdown source of a text body. `root` resolves `file`.
    pub fn markdown_source(&self, root: &Path) -> Result<Option<String>> {
        match self {
            Self::Text {
                markdown: Some(md), ..
            } => Ok(Some(md.clone())),
            Self::Text { file: Some(file), .. } => {
                let path = root.join(file);
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read markdown `{}`", path.display()))
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Markdown file the body reads, if any.
    pub fn markdown_file(&self) -> Option<&Path> {
        match self {
            Self::Text { file, .. } => file.as_deref(),
            _ => None,
        }
    }

    /// Local public-directory references with their config paths.
    ///
    /// External URLs are skipped.
    pub fn assets(&self, path: &FieldPath) -> Vec<(FieldPath, &str)> {
        let mut out = Vec::new();
        match self {
            Self::Model(model) => {
                out.push((path.join("src"), model.src.as_str()));
                for (i, texture) in model.textures.iter().enumerate() {
                    out.push((path.join_index("textures", i), texture.as_str()));
                }
            }
            Self::Gallery { items } => {
                for (i, item) in items.iter().enumerate() {
                    out.push((path.join_index("items", i).join("src"), item.src.as_str()));
                }
            }
            _ => {}
        }
        out.retain(|(_, reference)| !is_external(reference));
        out
    }

    pub fn validate(&self, path: &FieldPath, root: &Path, diag: &mut ConfigDiagnostics) {
        match self {
            Self::Hero { text, wobble, .. } => {
                if text.trim().is_empty() {
                    diag.error(path.join("text"), "must not be empty");
                }
                if wobble.duration <= 0.0 {
                    diag.error(path.join("wobble").join("duration"), "must be positive");
                }
                if wobble.delay_step < 0.0 {
                    diag.error(path.join("wobble").join("delay_step"), "must not be negative");
                }
            }
            Self::Text { markdown, file } => match (markdown, file) {
                (Some(_), Some(_)) | (None, None) => diag.error_with_hint(
                    path.clone(),
                    "text body needs exactly one of `markdown` or `file`",
                    "inline short prose with `markdown`, point longer prose at a `.md` file",
                ),
                (None, Some(file)) if !root.join(file).is_file() => diag.error(
                    path.join("file"),
                    format!("markdown file `{}` not found", file.display()),
                ),
                _ => {}
            },
            Self::Labs { labs } => {
                for (i, lab) in labs.iter().enumerate() {
                    let field = path.join_index("labs", i).join("src");
                    match url::Url::parse(&lab.src) {
                        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                        _ => diag.error_with_hint(
                            field,
                            format!("`{}` is not an http(s) URL", lab.src),
                            "lab frames load external demos by absolute URL",
                        ),
                    }
                }
            }
            Self::Videos { videos, columns } => {
                if *columns == 0 {
                    diag.error(path.join("columns"), "must be at least 1");
                }
                for (i, video) in videos.iter().enumerate() {
                    if !YouTube::is_valid_id(&video.id) {
                        diag.error_with_hint(
                            path.join_index("videos", i).join("id"),
                            format!("`{}` is not a YouTube video id", video.id),
                            "use the 11-character `v=` value from the video URL",
                        );
                    }
                }
            }
            Self::Model(model) => {
                if model.src.trim().is_empty() {
                    diag.error(path.join("src"), "must not be empty");
                }
                if model.interval_ms == 0 {
                    diag.error(path.join("interval_ms"), "must be positive");
                }
                let camera = path.join("camera");
                if model.camera.min_distance > model.camera.max_distance {
                    diag.error(
                        camera.join("min_distance"),
                        "must not exceed `max_distance`",
                    );
                }
                if model.camera.damping <= 0.0 || model.camera.damping > 1.0 {
                    diag.error(camera.join("damping"), "must be in (0, 1]");
                }
            }
            Self::Gallery { items } => {
                for (i, item) in items.iter().enumerate() {
                    if item.src.trim().is_empty() {
                        diag.error(path.join_index("items", i).join("src"), "must not be empty");
                    }
                }
            }
        }
    }
}

/// Check section entries against the registry rules, reporting each problem
/// at its config path.
pub fn validate_sections(sections: &[SectionConfig], root: &Path, diag: &mut ConfigDiagnostics) {
    if sections.is_empty() {
        diag.error_with_hint(
            FieldPath::new("sections"),
            "at least one section is required",
            "add a `[[sections]]` table",
        );
        return;
    }

    let mut seen = FxHashSet::default();
    for (i, section) in sections.iter().enumerate() {
        let path = FieldPath::index("sections", i);

        if !Registry::is_valid_id(&section.id) {
            diag.error_with_hint(
                path.join("id"),
                format!("invalid section id `{}`", section.id),
                "ids start with a letter or digit and contain only letters, digits, `_` or `-`",
            );
        } else if !seen.insert(section.id.as_str()) {
            diag.error(
                path.join("id"),
                format!("duplicate section id `{}`", section.id),
            );
        }

        if section.nav.trim().is_empty() {
            diag.error(path.join("nav"), "must not be empty");
        }

        section.body.validate(&path.join("body"), root, diag);
    }
}
