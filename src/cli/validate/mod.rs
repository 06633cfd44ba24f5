//! Reference validation.
//!
//! Config shape (ids, URLs, tracker margins) is already checked when the
//! config loads. This command checks what only the filesystem can answer:
//! every local image, model, texture, background and link must exist in the
//! public directory, and every `#fragment` must name a section.

mod report;
mod scan;

use anyhow::Result;
use std::path::Path;

use crate::config::{FieldPath, SiteConfig};
use crate::log;
use crate::section::Registry;

use report::{ValidationReport, plural_s};
use scan::{RefKind, scan_markdown};

/// Validate all references of the loaded config.
pub fn validate_site(config: &SiteConfig, warn_only: bool) -> Result<()> {
    let registry = config.registry()?;
    let report = collect_report(config, &registry)?;

    let checked = count_refs(config);
    log!("validate"; "checked {} reference{} across {} section{}",
        checked, plural_s(checked), registry.len(), plural_s(registry.len()));

    report.print();
    log!("validate"; "{}", report);

    if report.is_empty() || warn_only {
        return Ok(());
    }
    let sources = report.source_count();
    anyhow::bail!(
        "found {} broken reference{} in {} source{}",
        report.error_count(),
        plural_s(report.error_count()),
        sources,
        plural_s(sources)
    )
}

/// Check every reference and collect the failures.
fn collect_report(config: &SiteConfig, registry: &Registry) -> Result<ValidationReport> {
    let public = &config.build.public;
    let mut report = ValidationReport::default();

    for (field, reference) in config.asset_refs() {
        check_ref(&mut report, field.as_str(), reference, public, registry);
    }

    for (i, link) in config.site.links.iter().enumerate() {
        let field = FieldPath::index("site.links", i).join("href");
        check_ref(&mut report, field.as_str(), &link.href, public, registry);
    }

    for (i, section) in config.sections.iter().enumerate() {
        let Some(markdown) = section.body.markdown_source(config.get_root())? else {
            continue;
        };
        let source = match section.body.markdown_file() {
            Some(file) => file.display().to_string(),
            None => FieldPath::index("sections", i)
                .join("body")
                .join("markdown")
                .as_str()
                .to_string(),
        };
        for link in scan_markdown(&markdown) {
            check_ref(&mut report, &source, &link.dest, public, registry);
        }
    }

    Ok(report)
}

fn check_ref(
    report: &mut ValidationReport,
    source: &str,
    reference: &str,
    public: &Path,
    registry: &Registry,
) {
    match RefKind::parse(reference) {
        RefKind::External => {}
        RefKind::Fragment(id) if id.is_empty() || registry.contains(id) => {}
        RefKind::Fragment(_) => report.add(
            source.to_string(),
            format!("`{reference}`"),
            "no section with this id".to_string(),
        ),
        RefKind::Public(path) => {
            let file = public.join(path);
            if path.is_empty() || !(file.is_file() || file.join("index.html").is_file()) {
                report.add(
                    source.to_string(),
                    format!("`{reference}`"),
                    format!("not found in {}", public.display()),
                );
            }
        }
    }
}

/// Total references looked at, for the summary line.
fn count_refs(config: &SiteConfig) -> usize {
    let markdown: usize = config
        .sections
        .iter()
        .filter_map(|s| s.body.markdown_source(config.get_root()).ok().flatten())
        .map(|md| scan_markdown(&md).len())
        .sum();
    config.asset_refs().len() + config.site.links.len() + markdown
}
