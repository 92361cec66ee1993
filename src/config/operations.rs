//! Config parsing, validation, and default accessors.

use super::model::PromptConfig;
use super::types::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_RESPONSE_MIME_TYPE, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P, SUPPORTED_MODELS,
};
use crate::error::{AirError, Result};
use crate::schema;

impl PromptConfig {
    /// Parse config from a YAML string and validate it.
    ///
    /// An empty or whitespace-only document yields the default config.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: PromptConfig = serde_yaml::from_str(yaml)
            .map_err(|e| AirError::ConfigError(format!("failed to parse YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `model` must be a supported model
    /// - `temperature` must be within `[0, 2]`
    /// - `topP` must be within `[0, 1]`
    /// - `maxTokens` must be positive
    /// - `responseSchema` must compile as a JSON schema
    pub fn validate(&self) -> Result<()> {
        if let Some(model) = self.model.as_deref().filter(|m| !m.is_empty())
            && !SUPPORTED_MODELS.contains(&model)
        {
            return Err(AirError::ConfigError(format!(
                "model: unsupported model: {} (supported: {})",
                model,
                SUPPORTED_MODELS.join(", ")
            )));
        }

        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(AirError::ConfigError(format!(
                "temperature must be between 0 and 2 (found {})",
                t
            )));
        }

        if let Some(p) = self.top_p
            && !(0.0..=1.0).contains(&p)
        {
            return Err(AirError::ConfigError(format!(
                "topP must be between 0 and 1 (found {})",
                p
            )));
        }

        if let Some(max) = self.max_tokens
            && max <= 0
        {
            return Err(AirError::ConfigError(format!(
                "maxTokens must be greater than 0 (found {})",
                max
            )));
        }

        if let Some(response_schema) = &self.response_schema {
            schema::check_schema(response_schema)
                .map_err(|e| AirError::ConfigError(format!("responseSchema: {}", e)))?;
        }

        Ok(())
    }

    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn top_p_or_default(&self) -> f32 {
        self.top_p.unwrap_or(DEFAULT_TOP_P)
    }

    pub fn max_tokens_or_default(&self) -> i32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Empty strings count as unset.
    pub fn response_mime_type_or_default(&self) -> &str {
        self.response_mime_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_RESPONSE_MIME_TYPE)
    }

    /// Empty strings count as unset.
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }
}
