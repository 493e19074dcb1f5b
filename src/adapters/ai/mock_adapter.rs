//! Mock generative adapter for testing without API calls.
//!
//! Replays a canned reply through the same text normalization as the real
//! adapter, and records what it was asked.

use crate::domain::{DomainError, GenerationOverrides, Generated};
use crate::ports::{GenerativePort, PromptContext};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// What the mock answers with on every call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Model text, normalized like a real response (JSON or raw passthrough).
    Text(String),
    /// Successful status with zero candidates.
    NoContent,
    /// Non-success status with a raw body.
    Status { status: u16, body: String },
}

/// Mock generative adapter.
///
/// Returns a predetermined reply without making API calls. Simulates network
/// latency with a configurable delay (0 by default).
#[derive(Debug)]
pub struct MockGenerativeAdapter {
    reply: MockReply,
    delay_ms: u64,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    last_overrides: Mutex<Option<GenerationOverrides>>,
}

impl MockGenerativeAdapter {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            last_overrides: Mutex::new(None),
        }
    }

    /// Mock that answers every prompt with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Mock that answers with `value` serialized as JSON text.
    pub fn with_json(value: &serde_json::Value) -> Self {
        Self::with_text(value.to_string())
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Number of `generate` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Overrides passed on the most recent call (`None` if the caller passed none).
    pub fn last_overrides(&self) -> Option<GenerationOverrides> {
        self.last_overrides.lock().ok().and_then(|p| *p)
    }
}

#[async_trait::async_trait]
impl GenerativePort for MockGenerativeAdapter {
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&PromptContext>,
        overrides: Option<GenerationOverrides>,
    ) -> Result<Generated<serde_json::Value>, DomainError> {
        info!(
            prompt_len = prompt.len(),
            context_keys = context.map_or(0, |c| c.len()),
            "[MOCK] Simulating generative call"
        );

        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Ok(mut last) = self.last_overrides.lock() {
            *last = overrides;
        }

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match &self.reply {
            MockReply::Text(text) => Ok(Generated::from_model_text(text)),
            MockReply::NoContent => Err(DomainError::NoContent),
            MockReply::Status { status, body } => Err(DomainError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
