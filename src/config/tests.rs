//! Tests for config functionality.

use crate::config::PromptConfig;
use crate::config::types::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_RESPONSE_MIME_TYPE, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P, SUPPORTED_MODELS,
};
use crate::error::AirError;
use serde_json::json;

#[test]
fn test_default_config() {
    let config = PromptConfig::default();

    assert_eq!(config.temperature, None);
    assert_eq!(config.model, None);
    assert!(config.variables.is_empty());
    assert!(config.response_schema.is_none());

    assert_eq!(config.temperature_or_default(), DEFAULT_TEMPERATURE);
    assert_eq!(config.top_p_or_default(), DEFAULT_TOP_P);
    assert_eq!(config.max_tokens_or_default(), DEFAULT_MAX_TOKENS);
    assert_eq!(config.response_mime_type_or_default(), DEFAULT_RESPONSE_MIME_TYPE);
    assert_eq!(config.model_or_default(), DEFAULT_MODEL);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = PromptConfig::from_yaml("").unwrap();
    assert_eq!(config, PromptConfig::default());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
temperature: 0.7
topP: 0.5
maxTokens: 1024
responseMimeType: text/plain
model: gemini-1.5-flash-002
variables:
  name: World
  count: 3
  strict: true
  nothing: ~
responseSchema:
  type: object
  properties:
    answer:
      type: string
  required: [answer]
"#;
    let config = PromptConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.temperature, Some(0.7));
    assert_eq!(config.top_p, Some(0.5));
    assert_eq!(config.max_tokens, Some(1024));
    assert_eq!(config.response_mime_type_or_default(), "text/plain");
    assert_eq!(config.model_or_default(), "gemini-1.5-flash-002");

    assert_eq!(config.variables.get("name"), Some(&"World".to_string()));
    assert_eq!(config.variables.get("count"), Some(&"3".to_string()));
    assert_eq!(config.variables.get("strict"), Some(&"true".to_string()));
    assert_eq!(config.variables.get("nothing"), Some(&String::new()));

    assert_eq!(
        config.response_schema,
        Some(json!({
            "type": "object",
            "properties": { "answer": { "type": "string" } },
            "required": ["answer"]
        }))
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
model: gemini-2.0-flash-001
safetySettings:
  hate_speech: BLOCK_NONE
someFutureKey: 42
"#;
    let config = PromptConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.model_or_default(), "gemini-2.0-flash-001");
}

#[test]
fn test_empty_strings_fall_back_to_defaults() {
    let config = PromptConfig::from_yaml("model: \"\"\nresponseMimeType: \"\"").unwrap();
    assert_eq!(config.model_or_default(), DEFAULT_MODEL);
    assert_eq!(config.response_mime_type_or_default(), DEFAULT_RESPONSE_MIME_TYPE);
}

#[test]
fn test_all_supported_models_validate() {
    for model in SUPPORTED_MODELS {
        let config = PromptConfig {
            model: Some(model.to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok(), "{} should be supported", model);
    }
}

#[test]
fn test_validate_rejects_unsupported_model() {
    let err = PromptConfig::from_yaml("model: gemini-ultra").unwrap_err();
    assert!(matches!(err, AirError::ConfigError(_)));
    assert!(err.to_string().contains("unsupported model: gemini-ultra"));
}

#[test]
fn test_validate_rejects_out_of_range_sampling() {
    assert!(PromptConfig::from_yaml("temperature: 2.5").is_err());
    assert!(PromptConfig::from_yaml("temperature: -0.1").is_err());
    assert!(PromptConfig::from_yaml("topP: 1.5").is_err());
    assert!(PromptConfig::from_yaml("maxTokens: 0").is_err());
    assert!(PromptConfig::from_yaml("temperature: 2.0\ntopP: 1.0\nmaxTokens: 1").is_ok());
}

#[test]
fn test_validate_rejects_invalid_schema() {
    let yaml = r#"
responseSchema:
  type: 12
"#;
    let err = PromptConfig::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("responseSchema"));
}

#[test]
fn test_nested_variables_are_rejected() {
    let yaml = r#"
variables:
  list: [a, b]
"#;
    let err = PromptConfig::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("variable 'list'"));
}

#[test]
fn test_wrong_type_is_a_parse_error() {
    let err = PromptConfig::from_yaml("temperature: hot").unwrap_err();
    assert!(matches!(err, AirError::ConfigError(_)));
    assert!(err.to_string().contains("failed to parse YAML"));
}
