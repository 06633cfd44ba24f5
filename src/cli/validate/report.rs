//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

/// A single validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The reference that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Broken references grouped by where they were written (a config field or
/// a markdown file).
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub refs: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationReport {
    pub fn add(&mut self, source: String, target: String, reason: String) {
        self.refs
            .entry(source)
            .or_default()
            .push(ValidationError { target, reason });
    }

    /// Number of sources with at least one error.
    pub fn source_count(&self) -> usize {
        self.refs.len()
    }

    pub fn error_count(&self) -> usize {
        self.refs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Print every error to stderr.
    pub fn print(&self) {
        if self.refs.is_empty() {
            return;
        }
        eprintln!();

        let sources = self.source_count();
        let errors = self.error_count();
        eprintln!(
            "{} {}",
            "references".red().bold(),
            format!(
                "({sources} source{}, {errors} error{})",
                plural_s(sources),
                plural_s(errors)
            )
            .dimmed()
        );

        for (source, errs) in &self.refs {
            eprintln!("{}{}{}", "[".dimmed(), source.cyan(), "]".dimmed());
            for e in errs {
                if e.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), e.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason.dimmed());
                }
            }
        }
    }
}

pub fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )
        }
    }
}
