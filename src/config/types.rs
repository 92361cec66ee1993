//! Configuration constants and serde helpers for prompt frontmatter.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

/// Model used when the frontmatter does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Region used when `GOOGLE_CLOUD_LOCATION` is unset.
pub const DEFAULT_LOCATION: &str = "europe-west1";

pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_MAX_TOKENS: i32 = 8192;
pub const DEFAULT_RESPONSE_MIME_TYPE: &str = "application/json";

/// Models accepted by the `model` frontmatter key.
pub const SUPPORTED_MODELS: &[&str] = &[
    "gemini-2.0-flash-001",
    "gemini-1.5-pro-002",
    "gemini-1.5-pro-001",
    "gemini-1.5-flash-002",
    "gemini-1.5-flash-001",
];

/// Deserialize the `variables` block, stringifying scalar values.
///
/// `count: 3` and `strict: true` become `"3"` and `"true"`; `~` becomes the
/// empty string. Sequences and mappings are rejected.
pub(crate) fn deserialize_variables<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_yaml::Value>> = Option::deserialize(deserializer)?;
    let mut variables = HashMap::new();

    for (key, value) in raw.unwrap_or_default() {
        let value = match value {
            serde_yaml::Value::Null => String::new(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::String(s) => s,
            _ => {
                return Err(serde::de::Error::custom(format!(
                    "variable '{}' must be a string, number, or boolean",
                    key
                )));
            }
        };
        variables.insert(key, value);
    }

    Ok(variables)
}
