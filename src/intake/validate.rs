//! Field-by-field validation of untrusted state updates
//!
//! The oracle returns a whole candidate state object. Nothing in it is
//! trusted: each field is checked against the schema and merged into the
//! prior state one at a time, so one bad field never poisons its siblings.

use super::state::{Budget, FieldId, TravelDates, TripIntakeState, TripPace, TripType};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// A candidate field update refused during merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub field: FieldId,
    pub reason: String,
}

/// Result of merging a candidate state object
#[derive(Debug)]
pub struct MergeOutcome {
    pub state: TripIntakeState,
    pub rejected: Vec<RejectedField>,
}

/// Merge an untrusted candidate state object into the prior state.
///
/// Null or absent fields keep their prior values. Present fields are
/// validated individually: a valid value overwrites (last statement wins),
/// an invalid one is rejected while valid siblings still apply. Blank
/// strings carry no information for the location fields, and an empty
/// interests array never clears previously gathered interests.
pub fn merge_untrusted(prior: &TripIntakeState, candidate: &Map<String, Value>) -> MergeOutcome {
    let mut state = prior.clone();
    let mut rejected = Vec::new();

    // Unknown keys in the candidate are ignored
    for field in FieldId::PRIORITY {
        let Some(value) = candidate.get(field.as_str()) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if let Err(reason) = apply_field(&mut state, field, value) {
            rejected.push(RejectedField { field, reason });
        }
    }

    MergeOutcome { state, rejected }
}

fn apply_field(state: &mut TripIntakeState, field: FieldId, value: &Value) -> Result<(), String> {
    match field {
        FieldId::Destination => {
            if let Some(city) = nonblank_string(value)? {
                state.destination = Some(city);
            }
        }
        FieldId::StartingLocation => {
            if let Some(city) = nonblank_string(value)? {
                state.starting_location = Some(city);
            }
        }
        FieldId::DatesOfTravel => {
            state.dates_of_travel = merge_dates(state.dates_of_travel, value)?;
        }
        FieldId::TripType => {
            let text = expect_string(value)?;
            state.trip_type = Some(
                TripType::parse(text).ok_or_else(|| format!("Unknown trip type: {text}"))?,
            );
        }
        FieldId::NumberOfTravelers => {
            state.number_of_travelers = Some(expect_positive_int(value)?);
        }
        FieldId::Interests => {
            if let Some(interests) = expect_interests(value)? {
                state.interests = interests;
            }
        }
        FieldId::Budget => {
            let text = expect_string(value)?;
            state.budget =
                Some(Budget::parse(text).ok_or_else(|| format!("Unknown budget: {text}"))?);
        }
        FieldId::AccessibilityNeeds => {
            state.accessibility_needs = Some(expect_string(value)?.trim().to_string());
        }
        FieldId::DietaryNeeds => {
            state.dietary_needs = Some(expect_string(value)?.trim().to_string());
        }
        FieldId::AgeGroupOfTravelers => {
            state.age_group_of_travelers = Some(expect_string(value)?.trim().to_string());
        }
        FieldId::HowPackedTrip => {
            let text = expect_string(value)?;
            state.how_packed_trip = Some(
                TripPace::parse(text).ok_or_else(|| format!("Unknown trip pace: {text}"))?,
            );
        }
        FieldId::OkWithWalking => {
            state.ok_with_walking =
                Some(value.as_bool().ok_or_else(|| type_error("a boolean", value))?);
        }
    }
    Ok(())
}

fn expect_string(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| type_error("a string", value))
}

/// A blank string is no information, not an error
fn nonblank_string(value: &Value) -> Result<Option<String>, String> {
    let text = expect_string(value)?.trim();
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text.to_string()))
    }
}

fn expect_positive_int(value: &Value) -> Result<u32, String> {
    let count = value
        .as_u64()
        .ok_or_else(|| type_error("a positive integer", value))?;
    if count == 0 {
        return Err("Traveler count must be positive".to_string());
    }
    u32::try_from(count).map_err(|_| format!("Traveler count out of range: {count}"))
}

/// An empty array (or one that trims down to nothing) is no information
fn expect_interests(value: &Value) -> Result<Option<Vec<String>>, String> {
    let entries = value
        .as_array()
        .ok_or_else(|| type_error("an array of strings", value))?;
    let mut interests = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = entry
            .as_str()
            .ok_or_else(|| type_error("an array of strings", value))?
            .trim();
        if !text.is_empty() {
            interests.push(text.to_string());
        }
    }
    if interests.is_empty() {
        Ok(None)
    } else {
        Ok(Some(interests))
    }
}

/// The date pair is validated as a unit: a bad half rejects the whole pair,
/// but a valid half may land while the other stays unknown.
fn merge_dates(prior: TravelDates, value: &Value) -> Result<TravelDates, String> {
    let object = value
        .as_object()
        .ok_or_else(|| type_error("a date object", value))?;
    let start_date = parse_date_field(object.get("start_date"), prior.start_date)?;
    let end_date = parse_date_field(object.get("end_date"), prior.end_date)?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(format!("End date {end} precedes start date {start}"));
        }
    }

    Ok(TravelDates {
        start_date,
        end_date,
    })
}

fn parse_date_field(
    value: Option<&Value>,
    prior: Option<NaiveDate>,
) -> Result<Option<NaiveDate>, String> {
    match value {
        None | Some(Value::Null) => Ok(prior),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(prior),
        Some(Value::String(text)) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid ISO date: {text}")),
        Some(other) => Err(type_error("an ISO date string", other)),
    }
}

fn type_error(expected: &str, got: &Value) -> String {
    format!("Expected {expected}, got {got}")
}
