//! Markdown prose via pulldown-cmark.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::config::is_external;
use crate::utils::html::escape_attr;

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_SMART_PUNCTUATION);
    opts
}

/// Render markdown to HTML.
///
/// Links leaving the site open in a new tab. Site-root links and images
/// (`/resume.pdf`) are passed through `url` so they follow the deployment
/// prefix.
pub fn to_html(markdown: &str, url: impl Fn(&str) -> String) -> String {
    let site_root = |dest: &str| dest.starts_with('/') && !is_external(dest);

    let events = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if is_external(&dest_url) => Event::Html(CowStr::from(external_link(&dest_url, &title))),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if site_root(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::from(url(&dest_url)),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if site_root(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::from(url(&dest_url)),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn external_link(href: &str, title: &str) -> String {
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_attr(title))
    };
    format!(
        r#"<a href="{}"{title} target="_blank" rel="noopener noreferrer">"#,
        escape_attr(href)
    )
}
