//! Sandboxed iframe demos.

use crate::utils::html::{escape, escape_attr};
use serde::{Deserialize, Serialize};

const SANDBOX: &str = "allow-scripts allow-same-origin allow-forms allow-popups";
const ALLOW: &str = "fullscreen; clipboard-write";

/// An external demo shown in a lazy, sandboxed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabEmbed {
    pub title: String,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// CSS aspect ratio, e.g. `16/9`.
    #[serde(default = "default_ratio")]
    pub ratio: String,
}

fn default_ratio() -> String {
    "16/9".to_string()
}

impl LabEmbed {
    pub fn render(&self) -> String {
        let src = escape_attr(&self.src);
        let mut html = format!(
            r#"<figure class="lab"><div class="lab-frame" style="aspect-ratio:{}"><iframe src="{src}" title="{}" loading="lazy" allow="{ALLOW}" sandbox="{SANDBOX}" referrerpolicy="no-referrer"></iframe></div>"#,
            escape_attr(&self.ratio),
            escape_attr(&self.title),
        );
        if !self.title.is_empty() {
            html.push_str(&format!(
                r#"<div class="lab-title">{} <a href="{src}" target="_blank" rel="noopener noreferrer" aria-label="Open in new tab">&#8599;</a></div>"#,
                escape(&self.title),
            ));
        }
        if let Some(caption) = &self.caption {
            html.push_str(&format!(
                r#"<figcaption class="lab-caption">{}</figcaption>"#,
                escape(caption)
            ));
        }
        html.push_str("</figure>");
        html
    }
}

pub fn render_grid(labs: &[LabEmbed]) -> String {
    let items: String = labs.iter().map(LabEmbed::render).collect();
    format!(r#"<div class="lab-grid">{items}</div>"#)
}
