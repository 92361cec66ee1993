//! Placeholder substitution for prompt bodies.
//!
//! # Syntax
//!
//! - `{{name}}` - Substitutes the value of variable `name`
//! - `{{name|default}}` - Substitutes `name`, or `default` when undefined
//!
//! Names match `[A-Za-z_][A-Za-z0-9_]*`. A default is any run of characters
//! other than `}` and is inserted literally. `{{name|}}` has an explicit
//! empty default: it resolves to the empty string and is never missing.
//!
//! # Error Handling
//!
//! Undefined variables without a default are collected during a single pass
//! and reported together, sorted, so every problem shows up in one run.
//! Substituted values are inserted verbatim and never rescanned.

use super::TemplateError;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;
use std::sync::LazyLock;

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)(?:\|([^}]*))?\}\}")
        .expect("Invalid placeholder regex")
});

/// One placeholder occurrence in a text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Variable name.
    pub name: &'a str,
    /// Default text, if the placeholder has a `|`.
    pub default: Option<&'a str>,
    /// Byte range of the whole `{{...}}` token.
    pub span: Range<usize>,
}

/// Iterate over the placeholders in `text`, left to right.
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_PATTERN.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        Some(Placeholder {
            name: name.as_str(),
            default: caps.get(2).map(|m| m.as_str()),
            span: whole.range(),
        })
    })
}

/// Substitute every placeholder in `text`.
///
/// # Returns
///
/// * `Ok(String)` - The text with all placeholders replaced
/// * `Err(TemplateError::MissingVariables)` - Every undefined name without a
///   default, sorted and de-duplicated
pub fn substitute(
    text: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(text.len());
    let mut missing = BTreeSet::new();
    let mut cursor = 0;

    for placeholder in placeholders(text) {
        output.push_str(&text[cursor..placeholder.span.start]);

        match (variables.get(placeholder.name), placeholder.default) {
            (Some(value), _) => output.push_str(value),
            (None, Some(default)) => output.push_str(default),
            (None, None) => {
                missing.insert(placeholder.name.to_string());
                output.push_str(&text[placeholder.span.clone()]);
            }
        }

        cursor = placeholder.span.end;
    }
    output.push_str(&text[cursor..]);

    if missing.is_empty() {
        Ok(output)
    } else {
        Err(TemplateError::MissingVariables {
            names: missing.into_iter().collect(),
        })
    }
}
