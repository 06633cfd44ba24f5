//! Image gallery grid; each tile opens the modal viewer.

use crate::utils::html::{escape, escape_attr};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Image path under the public directory.
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GalleryItem {
    /// Text shown under the image in the modal viewer.
    pub fn caption(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.alt)
    }
}

/// Render the grid. `url` maps public paths to page URLs.
pub fn render_grid(items: &[GalleryItem], url: impl Fn(&str) -> String) -> String {
    let mut html = String::from(r#"<div class="gallery" data-gallery>"#);
    for (index, item) in items.iter().enumerate() {
        html.push_str(&format!(
            concat!(
                r#"<button type="button" class="gallery-item" data-index="{index}" data-src="{src}" data-caption="{caption}">"#,
                r#"<img src="{src}" alt="{alt}" loading="lazy" decoding="async"></button>"#
            ),
            index = index,
            src = escape_attr(&url(&item.src)),
            alt = escape_attr(&item.alt),
            caption = escape_attr(item.caption()),
        ));
    }
    html.push_str("</div>");
    html.push_str(MODAL_SHELL);
    html
}

/// Hidden dialog filled in by the page runtime.
const MODAL_SHELL: &str = concat!(
    r#"<div class="modal" role="dialog" aria-modal="true" hidden data-modal>"#,
    r#"<div class="modal-backdrop"></div>"#,
    r#"<div class="modal-body"><img class="modal-image" alt="">"#,
    r#"<button type="button" class="modal-prev" aria-label="Previous">&#8249;</button>"#,
    r#"<button type="button" class="modal-next" aria-label="Next">&#8250;</button>"#,
    r#"<div class="modal-caption"></div></div></div>"#
);

/// Plain-text list for places that cannot run the runtime (e.g. `<noscript>`).
pub fn render_captions(items: &[GalleryItem]) -> String {
    let list: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item.caption())))
        .collect();
    format!("<ul class=\"gallery-captions\">{list}</ul>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<GalleryItem> {
        vec![
            GalleryItem {
                src: "/graphics/logo_design.jpg".into(),
                alt: "logo_design".into(),
                title: Some("LOGO & ideas".into()),
            },
            GalleryItem {
                src: "/graphics/feminist_01.jpg".into(),
                alt: "feminist_01".into(),
                title: None,
            },
        ]
    }

    #[test]
    fn test_caption_prefers_title() {
        let items = items();
        assert_eq!(items[0].caption(), "LOGO & ideas");
        assert_eq!(items[1].caption(), "feminist_01");
    }

    #[test]
    fn test_grid_indexes_tiles() {
        let html = render_grid(&items(), |p| p.to_string());
        assert!(html.contains(r#"data-index="0" data-src="/graphics/logo_design.jpg""#));
        assert!(html.contains(r#"data-index="1""#));
        assert!(html.contains(r#"data-caption="LOGO &amp; ideas""#));
        assert!(html.contains("data-modal"));
    }

    #[test]
    fn test_captions_list() {
        let html = render_captions(&items());
        assert!(html.contains("<li>LOGO &amp; ideas</li>"));
    }
}
