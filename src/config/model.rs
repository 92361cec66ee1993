//! Configuration model for prompt templates.
//!
//! This module defines the PromptConfig struct that represents a template's
//! YAML frontmatter. Unknown keys are ignored for forward compatibility and
//! every field is optional; defaults are applied by the `*_or_default`
//! accessors rather than at parse time.

use super::types::deserialize_variables;
use serde::Deserialize;
use std::collections::HashMap;

/// Generation settings and variables declared in a template's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptConfig {
    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling probability mass.
    pub top_p: Option<f32>,

    /// Maximum number of output tokens.
    pub max_tokens: Option<i32>,

    /// MIME type requested for the response (e.g. `application/json`).
    pub response_mime_type: Option<String>,

    /// Model name; must be one of the supported models.
    pub model: Option<String>,

    /// Template variables (middle precedence, between env and `--var`).
    #[serde(deserialize_with = "deserialize_variables")]
    pub variables: HashMap<String, String>,

    /// JSON schema the response must satisfy.
    pub response_schema: Option<serde_json::Value>,
}
