//! Application use cases. Orchestrate domain logic via ports.

pub mod insight_service;
pub mod prompts;

pub use insight_service::InsightService;
