//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, GenerationOverrides, Generated};

/// Caller-supplied metadata travelling alongside a prompt. Reserved: not sent upstream.
pub type PromptContext = serde_json::Map<String, serde_json::Value>;

/// Generative text backend. One prompt in, one normalized result out.
#[async_trait::async_trait]
pub trait GenerativePort: Send + Sync {
    /// Send `prompt` and normalize the first candidate's text.
    ///
    /// - `context`: reserved for callers; adapters may log it but never transmit it
    /// - `overrides`: per-field sampling overrides layered over the adapter's configured
    ///   parameters; fields left unset (or `None` altogether) keep the configured value
    ///
    /// Returns [`Generated::RawText`] when the text is not JSON. Transport
    /// failures, non-success statuses and empty candidate lists are errors.
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&PromptContext>,
        overrides: Option<GenerationOverrides>,
    ) -> Result<Generated<serde_json::Value>, DomainError>;
}
