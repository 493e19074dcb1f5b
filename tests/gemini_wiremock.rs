//! Integration tests for the Gemini gateway using WireMock
//!
//! These tests mock the generateContent HTTP API to verify request shape,
//! response normalization and error classification without a real API key.

use nomad_intel::adapters::ai::{GeminiAdapter, GeminiConfig};
use nomad_intel::domain::{DomainError, ErrorKind, GenerationOverrides, GenerationParams, Generated};
use nomad_intel::ports::GenerativePort;
use nomad_intel::usecases::InsightService;
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn config_for_mock(server: &MockServer) -> GeminiConfig {
    GeminiConfig::new("test-key")
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_model("test-model")
}

fn adapter_for_mock(server: &MockServer) -> GeminiAdapter {
    GeminiAdapter::new(config_for_mock(server)).expect("Failed to create adapter")
}

/// Sample generateContent success response carrying `text`
fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 42, "candidatesTokenCount": 17}
    })
}

async fn mount_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(text)))
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// Gateway Tests
// =============================================================================

mod gateway_tests {
    use super::*;

    #[tokio::test]
    async fn sends_prompt_credential_and_default_params() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Plan my week"}]}],
                "generationConfig": {"topK": 40, "maxOutputTokens": 8192}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(r#"{"ok": true}"#)))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for_mock(&server);
        let result = adapter.generate("Plan my week", None, None).await.unwrap();

        assert_eq!(result, Generated::Structured(json!({"ok": true})));
    }

    #[tokio::test]
    async fn per_call_params_override_defaults() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": {"topK": 5, "maxOutputTokens": 8192}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for_mock(&server);
        let overrides = GenerationOverrides::default().with_top_k(5);
        adapter.generate("p", None, Some(overrides)).await.unwrap();
    }

    #[tokio::test]
    async fn per_call_overrides_keep_configured_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": {"topK": 5, "maxOutputTokens": 512}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for_mock(&server)
            .with_params(GenerationParams::default().with_max_output_tokens(512));
        let adapter = GeminiAdapter::new(config).unwrap();
        let overrides = GenerationOverrides::default().with_top_k(5);
        adapter.generate("p", None, Some(overrides)).await.unwrap();
    }

    #[tokio::test]
    async fn configured_defaults_are_used_without_overrides() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": {"maxOutputTokens": 512}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for_mock(&server)
            .with_params(GenerationParams::default().with_max_output_tokens(512));
        let adapter = GeminiAdapter::new(config).unwrap();
        adapter.generate("p", None, None).await.unwrap();
    }

    #[tokio::test]
    async fn context_is_not_transmitted() {
        let server = MockServer::start().await;
        mount_reply(&server, "{}").await;

        let mut context = serde_json::Map::new();
        context.insert("userId".into(), json!("secret-user-42"));

        let adapter = adapter_for_mock(&server);
        adapter.generate("p", Some(&context), None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("secret-user-42"));
    }

    #[tokio::test]
    async fn non_json_text_is_raw_passthrough() {
        let server = MockServer::start().await;
        mount_reply(&server, "I'm sorry, I can't help with that.").await;

        let adapter = adapter_for_mock(&server);
        let result = adapter.generate("p", None, None).await.unwrap();

        assert_eq!(
            result,
            Generated::RawText("I'm sorry, I can't help with that.".to_string())
        );
    }

    #[tokio::test]
    async fn fenced_json_is_structured() {
        let server = MockServer::start().await;
        mount_reply(&server, "```json\n{\"answer\": \"Lisbon\"}\n```").await;

        let adapter = adapter_for_mock(&server);
        let result = adapter.generate("p", None, None).await.unwrap();

        assert_eq!(result, Generated::Structured(json!({"answer": "Lisbon"})));
    }

    #[tokio::test]
    async fn zero_candidates_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for_mock(&server);
        let err = adapter.generate("p", None, None).await.unwrap_err();

        assert!(matches!(err, DomainError::NoContent));
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn blocked_prompt_without_candidates_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
            )
            .mount(&server)
            .await;

        let adapter = adapter_for_mock(&server);
        let err = adapter.generate("p", None, None).await.unwrap_err();
        assert!(matches!(err, DomainError::NoContent));
    }

    #[tokio::test]
    async fn error_status_carries_code_and_raw_body() {
        let server = MockServer::start().await;
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for_mock(&server);
        let err = adapter.generate("p", None, None).await.unwrap_err();

        match err {
            DomainError::Upstream { status, body: got } => {
                assert_eq!(status, 429);
                assert_eq!(got, body);
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_envelope_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let adapter = adapter_for_mock(&server);
        let err = adapter.generate("p", None, None).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidEnvelope(_)));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        let adapter = GeminiAdapter::new(
            GeminiConfig::new("test-key")
                .with_base_url("http://127.0.0.1:1/v1beta")
                .with_model("test-model"),
        )
        .unwrap();

        let err = adapter.generate("p", None, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
            .expect(0)
            .mount(&server)
            .await;

        let config = GeminiConfig {
            api_key: None,
            ..config_for_mock(&server)
        };
        let err = GeminiAdapter::new(config).unwrap_err();

        assert!(err.is_config());
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }
}

// =============================================================================
// End-to-end through the insight service
// =============================================================================

mod service_tests {
    use super::*;

    fn service_for_mock(server: &MockServer) -> InsightService {
        InsightService::new(Arc::new(adapter_for_mock(server)) as Arc<dyn GenerativePort>)
    }

    #[tokio::test]
    async fn calendar_conflict_scenario() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
                r#"{"hasConflict":true,"conflictDetails":"Overlapping","suggestedSolutions":[{"description":"Move call to 11:00","pros":["No disruption"],"cons":["Later start"]}]}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let events = json!([
            {"title": "Client call", "start": "2024-03-01T09:00Z"},
            {"title": "Flight to Lisbon", "start": "2024-03-01T09:30Z"}
        ]);
        let result = service_for_mock(&server)
            .analyze_calendar_conflicts(&events)
            .await
            .unwrap();

        let analysis = result.into_structured().expect("structured analysis");
        assert!(analysis.has_conflict);
        assert_eq!(analysis.suggested_solutions.map(|s| s.len()), Some(1));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Client call"));
        assert!(prompt.contains("2024-03-01T09:30Z"));
    }

    #[tokio::test]
    async fn out_of_range_rank_is_validation_error() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            r#"{"recommendations":[{"name":"Outsite","rank":9,"matchingFeatures":[],"drawbacks":[]}]}"#,
        )
        .await;

        let err = service_for_mock(&server)
            .recommend_coworking(&json!({"location": "Canggu"}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn raw_text_reaches_the_caller() {
        let server = MockServer::start().await;
        mount_reply(&server, "Budget looks fine overall.").await;

        let result = service_for_mock(&server)
            .analyze_budget(&json!({"expenses": []}))
            .await
            .unwrap();

        assert_eq!(result.raw_text(), Some("Budget looks fine overall."));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"rawResponse": "Budget looks fine overall."})
        );
    }
}
