//! Wire types for the `generateContent` endpoint.

use super::{AiError, GenerationResponse};
use crate::config::PromptConfig;
use crate::schema::to_vertex_schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resource path of a publisher model.
pub fn model_path(project: &str, location: &str, model: &str) -> String {
    format!(
        "projects/{}/locations/{}/publishers/google/models/{}",
        project, location, model
    )
}

/// Regional API host for `location`.
pub fn regional_base_url(location: &str) -> String {
    format!("https://{}-aiplatform.googleapis.com", location)
}

/// `generateContent` endpoint for `model_path` under `base_url`.
pub fn endpoint_url(base_url: &str, model_path: &str) -> String {
    format!(
        "{}/v1/{}:generateContent",
        base_url.trim_end_matches('/'),
        model_path
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: i32,
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

impl<'a> GenerateRequest<'a> {
    /// Build a single-turn user request with defaults applied from `config`.
    pub fn new(config: &PromptConfig, prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: config.temperature_or_default(),
                top_p: config.top_p_or_default(),
                max_output_tokens: config.max_tokens_or_default(),
                response_mime_type: config.response_mime_type_or_default().to_string(),
                response_schema: config.response_schema.as_ref().map(to_vertex_schema),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: UsageMetadata,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: u32,
    candidates_token_count: u32,
    total_token_count: u32,
}

/// Take the first text part of the first candidate.
pub fn extract_response(response: GenerateResponse) -> Result<GenerationResponse, AiError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(AiError::NoCandidates)?;

    let part = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .ok_or(AiError::EmptyContent)?;

    let text = part
        .text
        .filter(|text| !text.is_empty())
        .ok_or(AiError::NoText)?;

    let usage = response.usage_metadata;
    Ok(GenerationResponse {
        text,
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
        total_tokens: usage.total_token_count,
    })
}
