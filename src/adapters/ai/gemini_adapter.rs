//! Gemini `generateContent` adapter.
//!
//! Implements `GenerativePort`: one POST per call, no retry, no timeout, no
//! caching. The first candidate's text is parsed as JSON or passed through raw.

use crate::domain::{DomainError, GenerationOverrides, GenerationParams, Generated};
use crate::ports::{GenerativePort, PromptContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Explicit gateway settings. Built from `AppConfig` or by hand in tests.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Configured sampling parameters. Per-call overrides replace only the fields they set.
    pub params: GenerationParams,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            params: GenerationParams::default(),
        }
    }
}

/// Gemini adapter.
///
/// Construction fails with `DomainError::Config` when no credential is set, so
/// a gateway that exists can always attempt a call.
pub struct GeminiAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    defaults: GenerationParams,
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("endpoint", &self.endpoint)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl GeminiAdapter {
    pub fn new(config: GeminiConfig) -> Result<Self, DomainError> {
        let api_key = config
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                DomainError::Config(
                    "Gemini API key is not set (NOMAD_GEMINI_API_KEY or GEMINI_API_KEY)".to_string(),
                )
            })?;

        let base_url = config.base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(base_url)
            .map_err(|e| DomainError::Config(format!("Invalid Gemini base URL '{}': {}", base_url, e)))?;

        let model = config.model.trim();
        let model = model.strip_prefix("models/").unwrap_or(model);
        if model.is_empty() {
            return Err(DomainError::Config("Gemini model name is empty".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/models/{}:generateContent", base_url, model),
            api_key,
            defaults: config.params,
        })
    }

    /// Full `generateContent` URL this adapter posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(prompt: &str, params: GenerationParams) -> GenerateRequest {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: params,
        }
    }

    /// First candidate, first text part. Anything else is "no content".
    fn first_text(response: GenerateResponse) -> Result<String, DomainError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.text))
            .ok_or(DomainError::NoContent)
    }
}

/// Gemini API request structure.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationParams,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

/// Gemini API response structure. `candidates` is omitted when the prompt is blocked.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait::async_trait]
impl GenerativePort for GeminiAdapter {
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&PromptContext>,
        overrides: Option<GenerationOverrides>,
    ) -> Result<Generated<serde_json::Value>, DomainError> {
        let params = overrides.unwrap_or_default().apply(self.defaults);
        info!(
            prompt_len = prompt.len(),
            context_keys = context.map_or(0, |c| c.len()),
            temperature = params.temperature,
            max_output_tokens = params.max_output_tokens,
            "sending prompt to Gemini"
        );

        let request = Self::build_request(prompt, params);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Gemini API returned error"
            );
            return Err(DomainError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::InvalidEnvelope(e.to_string()))?;

        let text = Self::first_text(envelope).inspect_err(|_| {
            warn!("Gemini response had no candidates with text");
        })?;
        debug!(raw_len = text.len(), "received Gemini response");

        let generated = Generated::from_model_text(&text);
        if generated.is_raw() {
            warn!(
                raw = %text.chars().take(200).collect::<String>(),
                "Gemini text is not JSON; passing through raw response"
            );
        }
        Ok(generated)
    }
}
