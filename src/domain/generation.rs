//! Generation parameters and the two-variant result of a generative call.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Sampling controls sent as `generationConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Per-call sampling overrides. Unset fields keep the gateway's configured value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOverrides {
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationOverrides {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Layer the set fields over `base`.
    pub fn apply(&self, base: GenerationParams) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature.unwrap_or(base.temperature),
            top_k: self.top_k.unwrap_or(base.top_k),
            top_p: self.top_p.unwrap_or(base.top_p),
            max_output_tokens: self.max_output_tokens.unwrap_or(base.max_output_tokens),
        }
    }
}

/// Result of a generative call.
///
/// The upstream model is not guaranteed to honor formatting instructions, so
/// text that does not parse as JSON is passed through as [`Generated::RawText`]
/// instead of failing. Callers decide whether raw text is usable.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Structured(T),
    RawText(String),
}

impl Generated<serde_json::Value> {
    /// Parse model text as strict JSON, falling back to raw text.
    ///
    /// Surrounding whitespace and a single enclosing Markdown code fence
    /// (```` ```json ... ``` ````) are removed before parsing. The raw variant
    /// keeps the text exactly as received.
    pub fn from_model_text(text: &str) -> Self {
        match serde_json::from_str(strip_code_fence(text)) {
            Ok(value) => Generated::Structured(value),
            Err(_) => Generated::RawText(text.to_string()),
        }
    }
}

impl<T> Generated<T> {
    pub fn is_structured(&self) -> bool {
        matches!(self, Generated::Structured(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Generated::RawText(_))
    }

    pub fn structured(&self) -> Option<&T> {
        match self {
            Generated::Structured(v) => Some(v),
            Generated::RawText(_) => None,
        }
    }

    pub fn into_structured(self) -> Option<T> {
        match self {
            Generated::Structured(v) => Some(v),
            Generated::RawText(_) => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Generated::Structured(_) => None,
            Generated::RawText(text) => Some(text),
        }
    }

    /// Transform the structured payload; raw text passes through untouched.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Generated<U>, E> {
        match self {
            Generated::Structured(v) => f(v).map(Generated::Structured),
            Generated::RawText(text) => Ok(Generated::RawText(text)),
        }
    }
}

/// `Structured(v)` serializes as `v`; `RawText(t)` as `{"rawResponse": t}`.
impl<T: Serialize> Serialize for Generated<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Generated::Structured(v) => v.serialize(serializer),
            Generated::RawText(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("rawResponse", text)?;
                map.end()
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    match rest.strip_suffix("```") {
        Some(body) => body.trim(),
        None => trimmed,
    }
}
