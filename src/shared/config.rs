//! Application configuration. API credential, endpoint, generation defaults.

use crate::adapters::ai::GeminiConfig;
use crate::adapters::ai::gemini_adapter::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::domain::{GenerationOverrides, GenerationParams};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Gemini
    // ─────────────────────────────────────────────────────────────────────────
    /// Gemini API key. Read from NOMAD_GEMINI_API_KEY, falling back to GEMINI_API_KEY.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// API base URL. Read from NOMAD_GEMINI_BASE_URL.
    #[serde(default)]
    pub gemini_base_url: Option<String>,

    /// Model name. Defaults to "gemini-1.5-flash". Read from NOMAD_GEMINI_MODEL.
    #[serde(default)]
    pub gemini_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Generation defaults (each independently overridable)
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from NOMAD_TEMPERATURE.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Read from NOMAD_TOP_K.
    #[serde(default)]
    pub top_k: Option<u32>,

    /// Read from NOMAD_TOP_P.
    #[serde(default)]
    pub top_p: Option<f32>,

    /// Read from NOMAD_MAX_OUTPUT_TOKENS.
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("NOMAD_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("NOMAD"));
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // GEMINI_API_KEY is read directly (no NOMAD_ prefix) so existing .env files keep working
        if cfg.gemini_api_key.is_none() {
            cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        Ok(cfg)
    }

    /// Returns the API key if configured and non-blank.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    /// Returns the API base URL. Defaults to the public v1beta endpoint.
    pub fn gemini_base_url_or_default(&self) -> String {
        self.gemini_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
    }

    /// Returns the model name. Defaults to "gemini-1.5-flash".
    pub fn gemini_model_or_default(&self) -> String {
        self.gemini_model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    /// Built-in generation defaults with any configured overrides applied.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationOverrides {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
        }
        .apply(GenerationParams::default())
    }

    /// Returns true if a credential is present.
    pub fn is_ai_configured(&self) -> bool {
        self.gemini_api_key().is_some()
    }

    /// Explicit gateway settings for `GeminiAdapter::new`.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key(),
            base_url: self.gemini_base_url_or_default(),
            model: self.gemini_model_or_default(),
            params: self.generation_params(),
        }
    }
}
