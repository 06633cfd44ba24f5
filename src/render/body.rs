//! Section body markup.

use anyhow::Result;
use std::path::Path;

use super::markdown;
use crate::config::{PathResolver, SectionBody};
use crate::tracker::ActiveGate;
use crate::utils::html::escape;
use crate::widget::{ModelViewer, WobblyText, YouTube, gallery, lab, video};

/// Render a body. `active` is the initial gate state of its section.
pub fn render(
    body: &SectionBody,
    active: bool,
    root: &Path,
    paths: PathResolver<'_>,
) -> Result<String> {
    let url = |public: &str| paths.url_for(public);

    let html = match body {
        SectionBody::Hero {
            text,
            subtitle,
            wobble,
        } => {
            let mut title = WobblyText::new(text.as_str(), *wobble);
            title.set_active(active);
            let mut html = title.render();
            if let Some(subtitle) = subtitle {
                html.push_str(&format!(
                    r#"<p class="hero-subtitle">{}</p>"#,
                    escape(subtitle)
                ));
            }
            html
        }
        SectionBody::Text { .. } => {
            let source = body.markdown_source(root)?.unwrap_or_default();
            format!(r#"<div class="prose">{}</div>"#, markdown::to_html(&source, url))
        }
        SectionBody::Labs { labs } => lab::render_grid(labs),
        SectionBody::Videos { videos, columns } => video::render_grid(&YouTube, videos, *columns),
        SectionBody::Model(config) => {
            let mut viewer = ModelViewer::new(config.clone());
            viewer.set_active(active);
            viewer.render(url)
        }
        SectionBody::Gallery { items } => format!(
            "{}<noscript>{}</noscript>",
            gallery::render_grid(items, url),
            gallery::render_captions(items)
        ),
    };
    Ok(html)
}
