//! Typed variable injection into embedded text.

/// Variables substituted into an embedded template.
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;

    /// Compact representation of the variables for content hashing.
    ///
    /// Assets whose output depends on the variables must override this so
    /// their file name changes with them.
    fn hash_input(&self) -> String {
        String::new()
    }
}

/// Assets that take no variables.
impl TemplateVars for () {
    fn apply(&self, content: &str) -> String {
        content.to_string()
    }
}

/// Replace each placeholder with a JSON literal.
///
/// Placeholders stand where a JS expression is expected
/// (`const ids = __FOLIO_SECTIONS__;`), so values are always valid syntax.
pub fn inject_json(content: &str, pairs: &[(&str, serde_json::Value)]) -> String {
    pairs
        .iter()
        .fold(content.to_string(), |acc, (placeholder, value)| {
            acc.replace(placeholder, &value.to_string())
        })
}
