//! Video player embeds.
//!
//! Playback is delegated to the hosting service's player; the generator only
//! decides which URL goes into the frame and how much layout space it takes.

use crate::utils::html::escape_attr;
use serde::{Deserialize, Serialize};

/// Frame aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aspect {
    #[default]
    #[serde(rename = "16/9")]
    Landscape,
    #[serde(rename = "9/16")]
    Portrait,
}

impl Aspect {
    pub const fn css(self) -> &'static str {
        match self {
            Self::Landscape => "16 / 9",
            Self::Portrait => "9 / 16",
        }
    }
}

/// One hosted video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Provider video id (e.g. the `v=` parameter of a YouTube URL).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub aspect: Aspect,
}

/// Capability: turn a video source into a playable widget.
pub trait VideoEmbed {
    fn render(&self, video: &Video) -> String;
}

/// YouTube player through the privacy-enhanced domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTube;

impl YouTube {
    pub fn embed_url(id: &str) -> String {
        format!("https://www.youtube-nocookie.com/embed/{id}?playsinline=1&rel=0")
    }

    /// Whether `id` looks like a YouTube video id.
    pub fn is_valid_id(id: &str) -> bool {
        id.len() == 11
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl VideoEmbed for YouTube {
    fn render(&self, video: &Video) -> String {
        format!(
            r#"<div class="video-frame" style="aspect-ratio:{}"><iframe src="{}" title="{}" loading="lazy" allow="accelerometer; encrypted-media; fullscreen; picture-in-picture" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe></div>"#,
            video.aspect.css(),
            escape_attr(&Self::embed_url(&video.id)),
            escape_attr(&video.title),
        )
    }
}

/// Render a grid of videos through `embed`.
pub fn render_grid(embed: &impl VideoEmbed, videos: &[Video], columns: u8) -> String {
    let mut html = format!(r#"<div class="video-grid" style="--columns:{}">"#, columns.max(1));
    for video in videos {
        html.push_str(&embed.render(video));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(aspect: Aspect) -> Video {
        Video {
            id: "UxNyVMRb_bQ".into(),
            title: "web \"animation\"".into(),
            aspect,
        }
    }

    #[test]
    fn test_youtube_frame() {
        let html = YouTube.render(&video(Aspect::Portrait));
        assert!(html.contains("youtube-nocookie.com/embed/UxNyVMRb_bQ"));
        assert!(html.contains("aspect-ratio:9 / 16"));
        assert!(html.contains("title=\"web &quot;animation&quot;\""));
        assert!(html.contains("loading=\"lazy\""));
    }

    #[test]
    fn test_grid_columns() {
        let videos = [video(Aspect::Landscape), video(Aspect::Landscape)];
        let html = render_grid(&YouTube, &videos, 0);
        assert!(html.starts_with(r#"<div class="video-grid" style="--columns:1">"#));
        assert_eq!(html.matches("<iframe").count(), 2);
    }

    #[test]
    fn test_aspect_serde() {
        let video: Video =
            toml::from_str("id = \"KxYw6KzI_dM\"\ntitle = \"t\"\naspect = \"9/16\"").unwrap();
        assert_eq!(video.aspect, Aspect::Portrait);

        let video: Video = toml::from_str("id = \"KxYw6KzI_dM\"\ntitle = \"t\"").unwrap();
        assert_eq!(video.aspect, Aspect::Landscape);
    }

    #[test]
    fn test_valid_id() {
        assert!(YouTube::is_valid_id("KxYw6KzI_dM"));
        assert!(!YouTube::is_valid_id("short"));
        assert!(!YouTube::is_valid_id("has spaces!"));
    }
}
