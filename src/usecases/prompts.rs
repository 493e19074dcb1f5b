//! Prompt templates. Pure functions: same input data, same prompt string.
//!
//! Each template embeds the caller's data verbatim as pretty-printed JSON and
//! spells out the exact JSON shape the model must answer with. Input data is
//! not validated here; only the response is checked.

use crate::domain::Feature;
use serde_json::Value;

const JSON_ONLY: &str = "Respond with valid JSON only, with no markdown and no text outside the JSON object.";

const CONFLICT_SHAPE: &str = r#"{
  "hasConflict": boolean,
  "conflictDetails": "string (only when hasConflict is true)",
  "suggestedSolutions": [
    {
      "description": "string",
      "pros": ["string"],
      "cons": ["string"]
    }
  ]
}"#;

const COWORKING_SHAPE: &str = r#"{
  "recommendations": [
    {
      "name": "string",
      "rank": integer from 1 (best) to 5,
      "matchingFeatures": ["string"],
      "drawbacks": ["string"],
      "description": "string (optional)"
    }
  ]
}"#;

const TIME_ZONE_SHAPE: &str = r#"{
  "recommendedTimes": [
    {
      "startTime": "ISO-8601 timestamp",
      "endTime": "ISO-8601 timestamp",
      "locationImpacts": [
        {
          "location": "string",
          "localTime": "string",
          "impact": "Optimal" | "Acceptable" | "Challenging"
        }
      ]
    }
  ],
  "reasoning": "string (optional)"
}"#;

const BUDGET_SHAPE: &str = r#"{
  "categories": [
    {
      "category": "string",
      "amount": number,
      "percentage": number,
      "isWorkRelated": boolean
    }
  ],
  "comparisonToAverage": "Above average" | "Below average" | "Average",
  "comparisonDetails": "string (optional)",
  "savingsRecommendations": [
    {
      "description": "string",
      "potentialSavings": number (optional),
      "difficulty": "Easy" | "Medium" | "Hard"
    }
  ]
}"#;

const COMMUNITY_SHAPE: &str = r#"{
  "recommendations": [
    {
      "name": "string",
      "type": "string",
      "relevanceScore": number from 1 to 10,
      "description": "string",
      "url": "string (optional)",
      "matchingInterests": ["string"] (optional)
    }
  ]
}"#;

const LEGAL_SHAPE: &str = r#"{
  "visaInformation": {
    "summary": "string",
    "requirements": ["string"],
    "maxStay": "string (optional)"
  },
  "taxImplications": {
    "summary": "string",
    "considerations": ["string"]
  },
  "workLegality": {
    "summary": "string",
    "restrictions": ["string"]
  },
  "sources": ["string"],
  "disclaimer": "string"
}"#;

const ASSISTANT_SHAPE: &str = r#"{
  "answer": "string",
  "relatedModules": ["calendar" | "coworking" | "timezones" | "budget" | "community" | "legal"] (optional),
  "suggestedActions": ["string"] (optional)
}"#;

/// Render the prompt for `feature`. For [`Feature::Assistant`] the payload is
/// expected as `{"query": ..., "context": ...}`; see [`assistant`] for the direct form.
pub fn render(feature: Feature, payload: &Value) -> String {
    match feature {
        Feature::CalendarConflicts => calendar_conflicts(payload),
        Feature::Coworking => coworking(payload),
        Feature::TimeZones => time_zones(payload),
        Feature::Budget => budget(payload),
        Feature::Community => community(payload),
        Feature::Legal => legal(payload),
        Feature::Assistant => {
            let query = match payload.get("query") {
                Some(Value::String(q)) => q.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            assistant(&query, payload.get("context"))
        }
    }
}

pub fn calendar_conflicts(events: &Value) -> String {
    compose(
        "You are a scheduling assistant for a digital nomad who works remotely while travelling. \
         Analyze the following calendar events for conflicts: overlapping times, travel that \
         collides with meetings, and events that are impossible given time-zone changes. \
         If there is a conflict, explain it and suggest concrete solutions with their pros and cons.",
        "Calendar events",
        events,
        CONFLICT_SHAPE,
    )
}

pub fn coworking(request: &Value) -> String {
    compose(
        "You are a relocation advisor for remote workers. Recommend up to five co-working \
         spaces for the location and preferences below, ranked from 1 (best match) to 5. \
         For each space list the features that match the preferences and any drawbacks.",
        "Location and preferences",
        request,
        COWORKING_SHAPE,
    )
}

pub fn time_zones(meeting: &Value) -> String {
    compose(
        "You are a meeting planner for distributed teams. Given the participants, their \
         locations and the meeting constraints below, propose meeting windows as ISO-8601 \
         timestamps. For every window classify its impact on each location as Optimal, \
         Acceptable or Challenging.",
        "Meeting details",
        meeting,
        TIME_ZONE_SHAPE,
    )
}

pub fn budget(expenses: &Value) -> String {
    compose(
        "You are a financial advisor for digital nomads. Group the expenses below into \
         categories with totals and percentage of overall spending, flag which categories \
         are work related, compare the spending to the average for the location, and \
         recommend savings tagged by difficulty (Easy, Medium or Hard).",
        "Expenses and location",
        expenses,
        BUDGET_SHAPE,
    )
}

pub fn community(profile: &Value) -> String {
    compose(
        "You are a community manager connecting remote workers. Based on the profile and \
         location below, recommend communities, meetups and events, each with a relevance \
         score from 1 (weak match) to 10 (perfect match).",
        "User profile and location",
        profile,
        COMMUNITY_SHAPE,
    )
}

pub fn legal(request: &Value) -> String {
    compose(
        "You are a research assistant summarizing legal considerations for remote workers \
         moving between countries. Summarize visa options, tax implications and the legality \
         of remote work for the situation below. Include the sources you relied on and a \
         disclaimer that this is not legal advice. Omit any section you have no information for.",
        "Situation",
        request,
        LEGAL_SHAPE,
    )
}

pub fn assistant(query: &str, context: Option<&Value>) -> String {
    let mut prompt = String::from(
        "You are the assistant of a planning app for digital nomads. The app has modules for \
         calendar, coworking, timezones, budget, community and legal. Answer the user's \
         question concisely, name the modules it relates to, and suggest next actions.\n\n",
    );
    prompt.push_str(&format!("Question:\n{}\n\n", query));
    if let Some(ctx) = context.filter(|c| !c.is_null()) {
        prompt.push_str(&format!("User context:\n{:#}\n\n", ctx));
    }
    prompt.push_str(&format!(
        "{}\nUse exactly this format:\n{}",
        JSON_ONLY, ASSISTANT_SHAPE
    ));
    prompt
}

fn compose(instruction: &str, label: &str, data: &Value, shape: &str) -> String {
    format!(
        "{}\n\n{}:\n{:#}\n\n{}\nUse exactly this format:\n{}",
        instruction, label, data, JSON_ONLY, shape
    )
}
