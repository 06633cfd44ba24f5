//! Page rendering.
//!
//! The whole site is one document: a sidebar built from the registry, one
//! `<section>` per registry entry in the same order, and a footer. Section
//! anchors, nav entries and the runtime's section list all come from the same
//! [`Registry`], so they cannot disagree.

mod body;
mod layout;
mod markdown;

pub use layout::year_from_unix;

use anyhow::{Context, Result};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{SectionBody, SectionConfig, SiteConfig};
use crate::embed::page::{RUNTIME_JS, RuntimeVars, SITE_CSS};
use crate::section::Registry;
use crate::tracker::ActiveSection;
use crate::utils::html::{class_list, escape, escape_attr};
use std::sync::Arc;

/// Render `index.html` for the configured sections.
pub fn render_page(config: &SiteConfig, registry: &Arc<Registry>) -> Result<String> {
    let paths = config.paths();
    // Gates start in the tracker's initial state
    let state = ActiveSection::new(Arc::clone(registry));

    let mut sections = String::new();
    for (section, entry) in registry.iter().zip(&config.sections) {
        let body = body::render(
            &entry.body,
            state.is_active(&section.id),
            config.get_root(),
            paths,
        )
        .with_context(|| format!("Failed to render section `{}`", section.id))?;
        sections.push_str(&render_section(entry, &body));
    }

    let vars = RuntimeVars::from_config(config, registry);
    let assets = layout::Assets {
        css: paths.url_for(&SITE_CSS.url_path_with_vars(&())),
        runtime: paths.url_for(&RUNTIME_JS.url_path_with_vars(&vars)),
        model_viewer: config
            .sections
            .iter()
            .any(|s| matches!(s.body, SectionBody::Model(_))),
    };

    Ok(layout::document(
        config,
        &state,
        &assets,
        &sections,
        current_year(),
    ))
}

fn render_section(entry: &SectionConfig, body: &str) -> String {
    let section = entry.to_section();
    let class = class_list(&[Some("section"), section.theme.class()]);
    let id = escape_attr(&section.id);

    // Hero bodies carry their own heading
    let heading = if matches!(entry.body, SectionBody::Hero { .. }) {
        String::new()
    } else {
        format!(
            r#"<h2 class="section-title" id="{id}-title">{}</h2>"#,
            escape(&section.title)
        )
    };

    format!(
        r#"<section id="{id}" class="{class}" data-section aria-label="{}">{heading}{body}</section>"#,
        escape_attr(&section.title)
    )
}

fn current_year() -> i64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    year_from_unix(secs)
}
