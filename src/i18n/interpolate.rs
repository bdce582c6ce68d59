use crate::errors::{LocaleError, LocaleResult};
use std::collections::BTreeMap;

/// Values substituted into `{{placeholder}}` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContext {
    values: BTreeMap<String, String>,
}

impl TextContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Replace every `{{name}}` token in a template with its value from the
/// context. Whitespace inside the braces is ignored. An unterminated `{{`
/// is copied through unchanged.
pub fn interpolate(template: &str, context: &TextContext) -> LocaleResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return Ok(output);
        };

        let name = after_open[..end].trim();
        let value = context
            .get(name)
            .ok_or_else(|| LocaleError::MissingPlaceholder(name.to_string()))?;
        output.push_str(value);
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Names of the placeholders a template uses, in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..end].trim().to_string();
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &after_open[end + 2..];
    }
    names
}
