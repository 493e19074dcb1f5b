//! Domain errors. Returned by the gateway, validators, and insight service.
//!
//! Adapters map infrastructure errors into these. Every variant belongs to one
//! of three kinds (see [`ErrorKind`]) so callers can tell "service unreachable"
//! apart from "service returned a shape we can't trust".

use crate::domain::Feature;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generative API request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status. `body` is the raw error body as returned.
    #[error("Generative API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Generative API produced no content")]
    NoContent,

    #[error("Failed to decode generative API response: {0}")]
    InvalidEnvelope(String),

    /// Model output parsed as JSON but does not match the feature's schema.
    #[error("Invalid {feature} response: {reason}")]
    Validation { feature: Feature, reason: String },
}

/// Coarse classification of [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credential or bad settings. Fatal, not retryable.
    Configuration,
    /// Network failure, non-success status, or an empty/undecodable reply.
    Upstream,
    /// The assistant answered, but the answer is unusable.
    Validation,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Transport(_) | Self::Upstream { .. } | Self::NoContent | Self::InvalidEnvelope(_) => {
                ErrorKind::Upstream
            }
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_upstream(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }

    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(DomainError::Config("no key".into()).is_config());
        assert!(DomainError::NoContent.is_upstream());
        assert!(
            DomainError::Upstream {
                status: 503,
                body: "unavailable".into()
            }
            .is_upstream()
        );
        let err = DomainError::Validation {
            feature: Feature::Coworking,
            reason: "rank: out of range".into(),
        };
        assert!(err.is_validation());
        assert!(!err.is_upstream());
        assert_eq!(err.to_string(), "Invalid coworking response: rank: out of range");
    }

    #[test]
    fn test_upstream_message_keeps_status_and_body() {
        let err = DomainError::Upstream {
            status: 429,
            body: r#"{"error":{"message":"quota"}}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("quota"));
    }
}
