//! Variable sources and precedence merging.
//!
//! Conventional precedence, lowest to highest: process environment,
//! frontmatter `variables`, `--var` flags.

use std::collections::HashMap;

/// Merge variable sources in order; later sources override earlier ones.
///
/// A key missing from a later source never removes it from the result.
pub fn merge_variables<'a, I>(sources: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a HashMap<String, String>>,
{
    let mut merged = HashMap::new();
    for source in sources {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Snapshot of the process environment.
///
/// Entries whose key or value is not valid UTF-8 are skipped.
pub fn env_variables() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Parse a `key=value` pair, splitting at the first `=`.
pub fn parse_var(definition: &str) -> Result<(String, String), String> {
    match definition.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!(
            "invalid variable '{}': key must not be empty (expected key=value)",
            definition
        )),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!(
            "invalid variable '{}' (expected key=value)",
            definition
        )),
    }
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
