//! Response contracts. One per feature, each the declared shape of the model's JSON answer.
//!
//! Required fields are plain types, optional fields are `Option`. Enumerations
//! and numeric bounds are enforced at deserialization/validation time; none of
//! these types is ever default-filled.

use super::validation::{validate_iso_timestamp, validate_not_blank};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ─────────────────────────────────────────────────────────────────────────────
// Calendar conflicts
// ─────────────────────────────────────────────────────────────────────────────

/// Overlaps and travel clashes in a set of calendar events.
///
/// `conflict_details` and `suggested_solutions` are only meaningful when
/// `has_conflict` is true. This is a convention, not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConflictAnalysis {
    pub has_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_solutions: Option<Vec<SuggestedSolution>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedSolution {
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Co-working
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CoworkingRecommendation {
    #[validate(nested)]
    pub recommendations: Vec<CoworkingSpace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoworkingSpace {
    pub name: String,
    /// 1 is the best match.
    #[validate(range(min = 1, max = 5))]
    pub rank: u8,
    pub matching_features: Vec<String>,
    pub drawbacks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Time zones
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TimeZoneRecommendation {
    #[validate(nested)]
    pub recommended_times: Vec<MeetingWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// A proposed meeting slot and how it lands in each participant's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MeetingWindow {
    #[validate(custom(function = "validate_iso_timestamp"))]
    pub start_time: String,
    #[validate(custom(function = "validate_iso_timestamp"))]
    pub end_time: String,
    pub location_impacts: Vec<LocationImpact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationImpact {
    pub location: String,
    pub local_time: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Optimal,
    Acceptable,
    Challenging,
}

// ─────────────────────────────────────────────────────────────────────────────
// Budget
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    pub categories: Vec<ExpenseCategory>,
    pub comparison_to_average: BudgetComparison,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_details: Option<String>,
    pub savings_recommendations: Vec<SavingsRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub is_work_related: bool,
}

/// Spending relative to the local average for the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetComparison {
    #[serde(rename = "Above average")]
    AboveAverage,
    #[serde(rename = "Below average")]
    BelowAverage,
    #[serde(rename = "Average")]
    Average,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecommendation {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<f64>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

// ─────────────────────────────────────────────────────────────────────────────
// Community
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CommunityRecommendation {
    #[validate(nested)]
    pub recommendations: Vec<CommunityMatch>,
}

/// A community or event matched to the user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommunityMatch {
    pub name: String,
    /// Free-form kind, e.g. "meetup", "online group", "event".
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(range(min = 1.0, max = 10.0))]
    pub relevance_score: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_interests: Option<Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Legal
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LegalResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_information: Option<VisaInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_implications: Option<TaxImplications>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_legality: Option<WorkLegality>,
    pub sources: Vec<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaInformation {
    pub summary: String,
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stay: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxImplications {
    pub summary: String,
    pub considerations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLegality {
    pub summary: String,
    pub restrictions: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Assistant
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    pub answer: String,
    /// App modules the answer relates to (e.g. "budget", "calendar").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_modules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<Vec<String>>,
}
