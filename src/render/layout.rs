//! Document shell: head, sidebar, footer.

use crate::config::SiteConfig;
use crate::tracker::ActiveSection;
use crate::utils::html::{escape, escape_attr};

/// `<model-viewer>` web component, loaded only when a model section exists.
const MODEL_VIEWER_SRC: &str =
    "https://ajax.googleapis.com/ajax/libs/model-viewer/3.5.0/model-viewer.min.js";

/// URLs of the generated assets.
pub struct Assets {
    pub css: String,
    pub runtime: String,
    pub model_viewer: bool,
}

pub fn document(
    config: &SiteConfig,
    state: &ActiveSection,
    assets: &Assets,
    sections: &str,
    year: i64,
) -> String {
    let site = &config.site;
    let paths = config.paths();

    let mut head = format!(
        concat!(
            r#"<meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            r#"<title>{title}</title>"#,
        ),
        title = escape(&site.title),
    );
    if !site.description.is_empty() {
        head.push_str(&format!(
            r#"<meta name="description" content="{}">"#,
            escape_attr(&site.description)
        ));
    }
    head.push_str(&format!(
        r#"<link rel="stylesheet" href="{}">"#,
        escape_attr(&assets.css)
    ));
    if assets.model_viewer {
        head.push_str(&format!(
            r#"<script type="module" src="{MODEL_VIEWER_SRC}"></script>"#
        ));
    }
    head.push_str(&format!(
        r#"<script type="module" src="{}"></script>"#,
        escape_attr(&assets.runtime)
    ));

    let body_style = site
        .background
        .as_deref()
        .map(|bg| {
            format!(
                r#" style="background-image:url(&quot;{}&quot;)""#,
                escape_attr(&paths.url_for(bg))
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="{lang}"><head>{head}</head><body{body_style}>"#,
            r#"<button type="button" class="nav-toggle" aria-label="Menu" aria-controls="sidebar" aria-expanded="false">&#9776;</button>"#,
            "{sidebar}<main>{sections}</main>{footer}</body></html>\n"
        ),
        lang = escape_attr(&site.lang),
        head = head,
        body_style = body_style,
        sidebar = sidebar(config, state),
        sections = sections,
        footer = footer(site.author_name(), year),
    )
}

/// Brand, one nav entry per section and the external links.
///
/// The initially active section's entry carries `current-section`; the page
/// runtime moves it as the reader scrolls.
fn sidebar(config: &SiteConfig, state: &ActiveSection) -> String {
    let registry = state.registry();
    let paths = config.paths();

    let nav: String = registry
        .iter()
        .map(|section| {
            let current = if state.is_active(&section.id) {
                r#" class="current-section" aria-current="true""#
            } else {
                ""
            };
            format!(
                r#"<li><a href="{href}" data-nav="{id}"{current}>{label}</a></li>"#,
                href = escape_attr(&section.href()),
                id = escape_attr(&section.id),
                label = escape(&section.nav),
            )
        })
        .collect();

    let links: String = config
        .site
        .links
        .iter()
        .map(|link| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                escape_attr(&paths.url_for(&link.href)),
                escape(&link.label),
            )
        })
        .collect();
    let links = if links.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="link-list">{links}</ul>"#)
    };

    format!(
        concat!(
            r#"<aside class="sidebar" id="sidebar">"#,
            r#"<a class="brand" href="{home}">{brand}</a>"#,
            r#"<nav aria-label="Sections"><ul class="nav-list">{nav}</ul></nav>{links}</aside>"#
        ),
        home = escape_attr(&registry.first().href()),
        brand = escape(&config.site.title),
        nav = nav,
        links = links,
    )
}

fn footer(author: &str, year: i64) -> String {
    format!(
        r#"<footer class="footer">&copy; {year} {}</footer>"#,
        escape(author)
    )
}

/// Gregorian year of a Unix timestamp (UTC).
pub fn year_from_unix(secs: u64) -> i64 {
    // Civil-from-days over 400-year eras
    let days = (secs / 86_400) as i64 + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400;
    if month <= 2 { year + 1 } else { year }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_unix() {
        assert_eq!(year_from_unix(0), 1970);
        // 2000-02-29T12:00:00Z
        assert_eq!(year_from_unix(951_825_600), 2000);
        // 2023-12-31T23:59:59Z
        assert_eq!(year_from_unix(1_704_067_199), 2023);
        // 2024-01-01T00:00:00Z
        assert_eq!(year_from_unix(1_704_067_200), 2024);
    }

    #[test]
    fn test_footer_escapes_author() {
        assert_eq!(
            footer("A & B", 2024),
            r#"<footer class="footer">&copy; 2024 A &amp; B</footer>"#
        );
    }
}
