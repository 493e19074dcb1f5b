//! Insight service. One operation per feature: build prompt, call the gateway, validate.
//!
//! Stateless between calls: each operation is an independent request with no
//! shared mutable state, so calls may run concurrently in any order.

use crate::domain::{
    AssistantResponse, BudgetAnalysis, CommunityRecommendation, ConflictAnalysis,
    CoworkingRecommendation, DomainError, Feature, GenerationOverrides, Generated, LegalResource,
    TimeZoneRecommendation, validate_payload,
};
use crate::ports::{GenerativePort, PromptContext};
use crate::usecases::prompts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Service for schema-validated generative features.
///
/// Orchestrates the flow:
/// 1. Render the feature's prompt from the caller's payload
/// 2. Send it through the generative port
/// 3. Validate structured output against the feature's contract
/// 4. Pass raw (non-JSON) text through untouched
pub struct InsightService {
    gateway: Arc<dyn GenerativePort>,
    overrides: Option<GenerationOverrides>,
}

impl InsightService {
    /// Create a new insight service.
    ///
    /// # Arguments
    /// * `gateway` - Generative port implementation (Gemini, Mock, etc.)
    pub fn new(gateway: Arc<dyn GenerativePort>) -> Self {
        Self {
            gateway,
            overrides: None,
        }
    }

    /// Apply `overrides` on every call. Fields left unset keep the gateway's configured values.
    pub fn with_overrides(mut self, overrides: GenerationOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Detect overlapping or impossible calendar events.
    pub async fn analyze_calendar_conflicts(
        &self,
        events: &Value,
    ) -> Result<Generated<ConflictAnalysis>, DomainError> {
        self.call(Feature::CalendarConflicts, &prompts::calendar_conflicts(events), None)
            .await
    }

    /// Rank co-working spaces for a location and set of preferences.
    pub async fn recommend_coworking(
        &self,
        request: &Value,
    ) -> Result<Generated<CoworkingRecommendation>, DomainError> {
        self.call(Feature::Coworking, &prompts::coworking(request), None)
            .await
    }

    /// Propose meeting windows across participants' time zones.
    pub async fn recommend_meeting_times(
        &self,
        meeting: &Value,
    ) -> Result<Generated<TimeZoneRecommendation>, DomainError> {
        self.call(Feature::TimeZones, &prompts::time_zones(meeting), None)
            .await
    }

    pub async fn analyze_budget(
        &self,
        expenses: &Value,
    ) -> Result<Generated<BudgetAnalysis>, DomainError> {
        self.call(Feature::Budget, &prompts::budget(expenses), None)
            .await
    }

    pub async fn recommend_communities(
        &self,
        profile: &Value,
    ) -> Result<Generated<CommunityRecommendation>, DomainError> {
        self.call(Feature::Community, &prompts::community(profile), None)
            .await
    }

    pub async fn summarize_legal_resources(
        &self,
        request: &Value,
    ) -> Result<Generated<LegalResource>, DomainError> {
        self.call(Feature::Legal, &prompts::legal(request), None)
            .await
    }

    /// Free-form question. An object `context` is also handed to the gateway as prompt context.
    pub async fn ask_assistant(
        &self,
        query: &str,
        context: Option<&Value>,
    ) -> Result<Generated<AssistantResponse>, DomainError> {
        let prompt = prompts::assistant(query, context);
        let prompt_context = context.and_then(Value::as_object);
        self.call(Feature::Assistant, &prompt, prompt_context).await
    }

    /// Dispatch by feature and return the model's JSON once it validates.
    ///
    /// The returned value is the answer as the model sent it, not a re-encoding
    /// of the typed contract. For [`Feature::Assistant`] the payload is
    /// `{"query": ..., "context": ...}`.
    pub async fn run(&self, feature: Feature, payload: &Value) -> Result<Generated<Value>, DomainError> {
        let prompt = prompts::render(feature, payload);
        let context = match feature {
            Feature::Assistant => payload.get("context").and_then(Value::as_object),
            _ => None,
        };
        let check: fn(Feature, Value) -> Result<Value, DomainError> = match feature {
            Feature::CalendarConflicts => keep_validated::<ConflictAnalysis>,
            Feature::Coworking => keep_validated::<CoworkingRecommendation>,
            Feature::TimeZones => keep_validated::<TimeZoneRecommendation>,
            Feature::Budget => keep_validated::<BudgetAnalysis>,
            Feature::Community => keep_validated::<CommunityRecommendation>,
            Feature::Legal => keep_validated::<LegalResource>,
            Feature::Assistant => keep_validated::<AssistantResponse>,
        };
        self.call_with(feature, &prompt, context, check).await
    }

    async fn call<T>(
        &self,
        feature: Feature,
        prompt: &str,
        context: Option<&PromptContext>,
    ) -> Result<Generated<T>, DomainError>
    where
        T: DeserializeOwned + Validate,
    {
        self.call_with(feature, prompt, context, validate_payload::<T>)
            .await
    }

    async fn call_with<T>(
        &self,
        feature: Feature,
        prompt: &str,
        context: Option<&PromptContext>,
        validate: fn(Feature, Value) -> Result<T, DomainError>,
    ) -> Result<Generated<T>, DomainError> {
        info!(feature = %feature, prompt_len = prompt.len(), "requesting generative insight");

        let generated = self.gateway.generate(prompt, context, self.overrides).await?;

        let result = generated.try_map(|value| validate(feature, value));
        match &result {
            Ok(Generated::Structured(_)) => info!(feature = %feature, "response validated"),
            Ok(Generated::RawText(text)) => warn!(
                feature = %feature,
                raw_len = text.len(),
                "response was not JSON; returning raw text"
            ),
            Err(e) => warn!(feature = %feature, error = %e, "response failed validation"),
        }
        result
    }
}

/// Check `value` against `T`'s contract and hand back the untouched value.
fn keep_validated<T>(feature: Feature, value: Value) -> Result<Value, DomainError>
where
    T: DeserializeOwned + Validate,
{
    validate_payload::<T>(feature, value.clone())?;
    Ok(value)
}
