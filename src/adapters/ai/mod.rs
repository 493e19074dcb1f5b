//! AI adapter module. Implements GenerativePort for LLM integration.
//!
//! Provides the Gemini adapter and a mock adapter for testing.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::{GeminiAdapter, GeminiConfig};
pub use mock_adapter::{MockGenerativeAdapter, MockReply};
