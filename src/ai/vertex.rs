//! Vertex AI `generateContent` client.

use super::request::{
    GenerateRequest, GenerateResponse, endpoint_url, extract_response, model_path,
    regional_base_url,
};
use super::{AiError, GenerationClient, GenerationResponse, VertexSettings};
use crate::config::PromptConfig;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Blocking HTTP client for Vertex AI.
///
/// Credentials are resolved on each call, so building a client never needs
/// a project or token (`--show-prompt-only` runs without either).
pub struct VertexClient {
    http: Client,
    /// Fixed API host; `None` means the regional host for the configured location.
    base_url: Option<String>,
    /// Delay before the first retry; doubled for each further attempt.
    retry_delay: Duration,
}

impl VertexClient {
    pub fn new() -> Result<Self, AiError> {
        Ok(Self {
            http: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: None,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Client that sends every request to `base_url` instead of the regional host.
    pub fn with_base_url(
        base_url: impl Into<String>,
        retry_delay: Duration,
    ) -> Result<Self, AiError> {
        Ok(Self {
            base_url: Some(base_url.into()),
            retry_delay,
            ..Self::new()?
        })
    }

    fn endpoint(&self, settings: &VertexSettings, model: &str) -> String {
        let base = self
            .base_url
            .clone()
            .unwrap_or_else(|| regional_base_url(&settings.location));
        endpoint_url(
            &base,
            &model_path(&settings.project, &settings.location, model),
        )
    }

    /// Generate with explicit settings instead of reading the environment.
    pub fn generate_with_settings(
        &self,
        settings: &VertexSettings,
        config: &PromptConfig,
        prompt: &str,
    ) -> Result<GenerationResponse, AiError> {
        let url = self.endpoint(settings, config.model_or_default());

        debug!(model = %config.model_or_default(), location = %settings.location, "calling generation API");

        let request = GenerateRequest::new(config, prompt);
        let response = extract_response(self.call(&url, &settings.access_token, &request)?)?;

        debug!(
            "generation succeeded: input_tokens={}, output_tokens={}, total_tokens={}",
            response.input_tokens, response.output_tokens, response.total_tokens
        );

        Ok(response)
    }

    /// Post `request` to `url`.
    ///
    /// 429 and 5xx responses, timeouts, and connection failures are retried
    /// with exponential backoff; anything else fails immediately.
    fn call(
        &self,
        url: &str,
        token: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<GenerateResponse, AiError> {
        let mut last_error: Option<AiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_delay * (1 << (attempt - 1));
                warn!(
                    "generation call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                std::thread::sleep(delay);
            }

            let response = match self.http.post(url).bearer_auth(token).json(request).send() {
                Ok(r) => r,
                Err(e) if e.is_timeout() || e.is_connect() => {
                    warn!("generation request failed: {}", e);
                    last_error = Some(AiError::Http(e));
                    continue;
                }
                Err(e) => return Err(AiError::Http(e)),
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().unwrap_or_default();
                warn!("generation API returned {}: {}", status, body);
                last_error = Some(AiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            let body = response.text()?;

            if !status.is_success() {
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(AiError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(serde_json::from_str(&body)?);
        }

        Err(last_error.unwrap_or(AiError::Api {
            status: 0,
            message: format!("no response after {} attempts", MAX_RETRIES),
        }))
    }
}

impl GenerationClient for VertexClient {
    fn generate(
        &self,
        config: &PromptConfig,
        prompt: &str,
    ) -> Result<GenerationResponse, AiError> {
        let settings = VertexSettings::from_env()?;
        self.generate_with_settings(&settings, config, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT_PATH: &str = "/v1/projects/proj/locations/europe-west1/publishers/google/models/gemini-2.0-flash-001:generateContent";

    /// A mock API server. The blocking client must run outside the runtime,
    /// so only server setup and inspection go through `block_on`.
    struct MockApi {
        server: MockServer,
        rt: Runtime,
    }

    impl MockApi {
        fn start() -> Self {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let server = rt.block_on(MockServer::start());
            Self { server, rt }
        }

        fn mount(&self, mock: Mock) {
            self.rt.block_on(mock.mount(&self.server));
        }

        fn request_count(&self) -> usize {
            self.rt
                .block_on(self.server.received_requests())
                .map(|requests| requests.len())
                .unwrap_or(0)
        }

        fn client(&self) -> VertexClient {
            VertexClient::with_base_url(self.server.uri(), Duration::from_millis(1)).unwrap()
        }
    }

    fn settings() -> VertexSettings {
        VertexSettings {
            project: "proj".to_string(),
            location: "europe-west1".to_string(),
            access_token: "tok".to_string(),
        }
    }

    fn generate(client: &VertexClient) -> Result<GenerationResponse, AiError> {
        client.generate_with_settings(&settings(), &PromptConfig::default(), "Hello")
    }

    fn answer(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }],
            "usageMetadata": { "promptTokenCount": 3, "candidatesTokenCount": 1, "totalTokenCount": 4 }
        }))
    }

    #[test]
    fn test_endpoint_defaults_to_regional_host() {
        let client = VertexClient::new().unwrap();
        assert_eq!(
            client.endpoint(&settings(), "gemini-2.0-flash-001"),
            format!("https://europe-west1-aiplatform.googleapis.com{}", ENDPOINT_PATH)
        );
    }

    #[test]
    fn test_success_sends_bearer_token() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .and(header("authorization", "Bearer tok"))
                .respond_with(answer("hi")),
        );

        let response = generate(&api.client()).unwrap();

        assert_eq!(response.text, "hi");
        assert_eq!(response.total_tokens, 4);
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn test_rate_limit_is_retried() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
                .up_to_n_times(1)
                .with_priority(1),
        );
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .respond_with(answer("after retry"))
                .with_priority(2),
        );

        let response = generate(&api.client()).unwrap();

        assert_eq!(response.text, "after retry");
        assert_eq!(api.request_count(), 2);
    }

    #[test]
    fn test_server_errors_exhaust_retries() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .respond_with(ResponseTemplate::new(503).set_body_string("unavailable")),
        );

        let err = generate(&api.client()).unwrap_err();

        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
        assert_eq!(api.request_count(), MAX_RETRIES as usize);
    }

    #[test]
    fn test_client_error_message_is_extracted_without_retry() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "error": { "code": 400, "message": "model not found", "status": "INVALID_ARGUMENT" }
                }))),
        );

        let err = generate(&api.client()).unwrap_err();

        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "model not found");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn test_client_error_without_json_body_keeps_raw_text() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .respond_with(ResponseTemplate::new(403).set_body_string("forbidden")),
        );

        let err = generate(&api.client()).unwrap_err();

        assert!(matches!(err, AiError::Api { status: 403, ref message } if message == "forbidden"));
    }

    #[test]
    fn test_malformed_success_body_is_a_parse_error() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ENDPOINT_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
        );

        let err = generate(&api.client()).unwrap_err();

        assert!(matches!(err, AiError::Parse(_)), "{:?}", err);
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn test_connection_failure_is_retried() {
        // Nothing listens on port 1.
        let client =
            VertexClient::with_base_url("http://127.0.0.1:1", Duration::from_millis(1)).unwrap();

        let err = generate(&client).unwrap_err();

        assert!(matches!(err, AiError::Http(ref e) if e.is_connect()), "{:?}", err);
    }

    #[test]
    fn test_invalid_url_fails_without_retry() {
        let client = VertexClient::with_base_url("not a url", Duration::from_secs(5)).unwrap();

        let started = Instant::now();
        let err = generate(&client).unwrap_err();

        assert!(matches!(err, AiError::Http(ref e) if e.is_builder()), "{:?}", err);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
