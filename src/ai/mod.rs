//! Generation API client.
//!
//! All calls to the hosted model go through [`GenerationClient`]. The run
//! pipeline only sees the trait, so tests substitute a fake and the real
//! [`VertexClient`] stays the single place that speaks HTTP.

mod credentials;
mod request;
mod vertex;

use crate::config::PromptConfig;
use thiserror::Error;

use credentials::VertexSettings;
pub use vertex::VertexClient;

/// Errors raised while calling the generation API.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no candidates in response")]
    NoCandidates,

    #[error("empty content in response")]
    EmptyContent,

    #[error("no text in response")]
    NoText,

    #[error("credentials: {0}")]
    Credentials(String),
}

/// Text and token usage returned by a generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

/// A backend that turns a resolved prompt into generated text.
pub trait GenerationClient {
    fn generate(&self, config: &PromptConfig, prompt: &str)
    -> Result<GenerationResponse, AiError>;
}
