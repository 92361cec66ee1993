//! Response schema handling.
//!
//! The frontmatter `responseSchema` is a JSON schema. It is used twice: a
//! reduced copy is sent with the request so the model produces structured
//! output, and the full schema validates the text that comes back. A
//! response that fails validation is reported, not rejected.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from schema compilation or response validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema is not a mapping.
    #[error("schema must be a mapping")]
    NotAnObject,

    /// The schema does not compile.
    #[error("invalid JSON schema: {0}")]
    Invalid(String),

    /// The response text is not JSON.
    #[error("response is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    /// The response is JSON but violates the schema.
    #[error("response does not match schema: {}", .0.join("; "))]
    Violations(Vec<String>),
}

/// Check that `schema` is a mapping and compiles as a JSON schema.
pub fn check_schema(schema: &Value) -> Result<(), SchemaError> {
    compile(schema).map(|_| ())
}

fn compile(schema: &Value) -> Result<jsonschema::Validator, SchemaError> {
    if !schema.is_object() {
        return Err(SchemaError::NotAnObject);
    }
    jsonschema::validator_for(schema).map_err(|e| SchemaError::Invalid(e.to_string()))
}

/// Validate a response body against `schema`, collecting every violation.
pub fn validate_response(response: &str, schema: &Value) -> Result<(), SchemaError> {
    let validator = compile(schema)?;
    let data: Value = serde_json::from_str(response)?;

    let violations: Vec<String> = validator
        .iter_errors(&data)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Violations(violations))
    }
}

/// Pretty-print a JSON response with two-space indentation.
///
/// Text that is not JSON is returned unchanged.
pub fn format_response(response: &str) -> String {
    serde_json::from_str::<Value>(response)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| response.to_string())
}

/// Convert a JSON schema into the subset accepted by the generation API.
///
/// Keeps `type` (upper-cased), `properties`, `items`, string `enum` values,
/// and `required`. Everything else is dropped.
pub fn to_vertex_schema(schema: &Value) -> Value {
    let mut converted = Map::new();

    if let Some(kind) = schema.get("type").and_then(Value::as_str).and_then(vertex_type) {
        converted.insert("type".to_string(), Value::from(kind));
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        let properties: Map<String, Value> = properties
            .iter()
            .filter(|(_, prop)| prop.is_object())
            .map(|(name, prop)| (name.clone(), to_vertex_schema(prop)))
            .collect();
        converted.insert("properties".to_string(), Value::Object(properties));
    }

    if let Some(items) = schema.get("items").filter(|items| items.is_object()) {
        converted.insert("items".to_string(), to_vertex_schema(items));
    }

    for key in ["enum", "required"] {
        if let Some(values) = schema.get(key).and_then(Value::as_array) {
            let strings: Vec<Value> = values.iter().filter(|v| v.is_string()).cloned().collect();
            converted.insert(key.to_string(), Value::Array(strings));
        }
    }

    Value::Object(converted)
}

fn vertex_type(kind: &str) -> Option<&'static str> {
    match kind {
        "string" => Some("STRING"),
        "number" => Some("NUMBER"),
        "integer" => Some("INTEGER"),
        "boolean" => Some("BOOLEAN"),
        "object" => Some("OBJECT"),
        "array" => Some("ARRAY"),
        _ => None,
    }
}
