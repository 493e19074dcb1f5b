//! Core domain layer. No external I/O dependencies.
//!
//! Response contracts, validation rules and the generative result type live here.

pub mod entities;
pub mod errors;
pub mod feature;
pub mod generation;
pub mod validation;

pub use entities::{
    AssistantResponse, BudgetAnalysis, BudgetComparison, CommunityMatch, CommunityRecommendation,
    ConflictAnalysis, CoworkingRecommendation, CoworkingSpace, Difficulty, ExpenseCategory,
    Impact, LegalResource, LocationImpact, MeetingWindow, SavingsRecommendation,
    SuggestedSolution, TaxImplications, TimeZoneRecommendation, VisaInformation, WorkLegality,
};
pub use errors::{DomainError, ErrorKind};
pub use feature::Feature;
pub use generation::{GenerationOverrides, GenerationParams, Generated};
pub use validation::validate_payload;
