//! Extraction prompt assembly and fallback questions

use super::state::{FieldId, TripIntakeState};
use crate::llm::LlmRequest;
use chrono::Utc;

/// User turns of history shown to the oracle for disambiguation
pub const HISTORY_WINDOW: usize = 3;

/// Longest utterance fragment forwarded to the oracle
const MAX_UTTERANCE_CHARS: usize = 500;

const MAX_REPLY_TOKENS: u32 = 1024;
const EXTRACTION_TEMPERATURE: f32 = 0.1;

const SYSTEM_PROMPT: &str = "You are a warm, friendly travel assistant gathering the details needed \
     to plan a trip, including for travelers with accessibility requirements. \
     You always respond with a single JSON object and nothing else.";

/// Build the single-turn extraction request.
///
/// The oracle sees the full current state (unknown fields as null), a short
/// window of recent user turns, and the latest utterance. It is asked for a
/// complete updated state plus one follow-up question; everything it returns
/// is re-validated locally.
pub fn build_extraction_request(
    state: &TripIntakeState,
    utterance: &str,
    history: &[String],
) -> LlmRequest {
    let state_json =
        serde_json::to_string_pretty(state).unwrap_or_else(|_| "{}".to_string());
    let today = Utc::now().date_naive().format("%B %d, %Y");
    let latest = truncate_chars(utterance, MAX_UTTERANCE_CHARS);

    let mut history_block = String::new();
    for turn in recent_turns(history) {
        history_block.push_str("USER: ");
        history_block.push_str(turn);
        history_block.push('\n');
    }
    if history_block.is_empty() {
        history_block.push_str("(first message of the conversation)\n");
    }

    let prompt = format!(
        r#"# Trip details so far
{state_json}

# Field reference, in priority order
- destination: city the traveler wants to visit
- dates_of_travel: {{"start_date": "YYYY-MM-DD", "end_date": "YYYY-MM-DD"}}; end_date must not precede start_date
- starting_location: city the traveler departs from
- trip_type: one of "leisure", "business", "adventure", "cultural", "family", "romantic"
- number_of_travelers: positive integer
- interests: list with at least one interest
- budget: one of "economy", "mid-range", "luxury"
- accessibility_needs: free text; "" when the traveler has none
- dietary_needs: free text; "" when the traveler has none
- age_group_of_travelers: free text describing traveler ages; "" when not applicable
- how_packed_trip: one of "relaxed", "moderate", "busy"
- ok_with_walking: true or false

# Recent conversation
{history_block}
# Latest user message
USER: "{latest}"

# Instructions
1. Update the trip details with anything the latest message establishes.
   - Only fill a field when the user actually provided it.
   - When the user contradicts an earlier answer, keep the most recent statement.
   - Convert relative dates to ISO dates; today is {today}.
   - Never remove a previously filled value unless the user explicitly changes it. Use null for anything still unknown.
2. List the fields that are still unknown, in the priority order above.
3. Write one warm, conversational question asking about the single most important unknown field.

# Response format (JSON only, no markdown fences)
{{"updated_json": {{ ...the complete updated trip details... }}, "missing_fields": ["..."], "next_question": "..."}}"#
    );

    LlmRequest::user(prompt)
        .with_system(SYSTEM_PROMPT)
        .with_max_tokens(MAX_REPLY_TOKENS)
        .with_temperature(EXTRACTION_TEMPERATURE)
}

/// Fixed follow-up question used when the oracle does not supply one
pub fn question_for(field: FieldId) -> &'static str {
    match field {
        FieldId::Destination => "Where would you like to go?",
        FieldId::DatesOfTravel => {
            "When would you like to travel? A start and end date would be perfect."
        }
        FieldId::StartingLocation => "Where will you be traveling from?",
        FieldId::TripType => {
            "What kind of trip is this? Leisure, business, adventure, cultural, family, or romantic?"
        }
        FieldId::NumberOfTravelers => "How many people will be traveling?",
        FieldId::Interests => "What would you love to see or do on this trip?",
        FieldId::Budget => "What budget are you planning around: economy, mid-range, or luxury?",
        FieldId::AccessibilityNeeds => "Do you have any accessibility needs I should plan for?",
        FieldId::DietaryNeeds => "Any dietary needs or restrictions I should keep in mind?",
        FieldId::AgeGroupOfTravelers => "What age group are the travelers in?",
        FieldId::HowPackedTrip => {
            "How packed would you like the itinerary: relaxed, moderate, or busy?"
        }
        FieldId::OkWithWalking => "Are you comfortable with a fair amount of walking?",
    }
}

fn recent_turns(history: &[String]) -> &[String] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    }
}
