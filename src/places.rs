//! Places query assembly
//!
//! Turns whatever intake facts exist into a point-of-interest search query.
//! Tolerates arbitrarily incomplete states, so callers can preview the
//! query mid-conversation.

use crate::intake::{Budget, TripIntakeState, TripPace};
use serde::Serialize;

/// Attractions radius when the stay length is unknown
const DEFAULT_RADIUS_METERS: u32 = 5000;
const SHORT_STAY_RADIUS_METERS: u32 = 3000;
const MEDIUM_STAY_RADIUS_METERS: u32 = 7000;
/// Capped to avoid excessively broad searches on long stays
const LONG_STAY_RADIUS_METERS: u32 = 15_000;

const PLACE_FIELDS: &[&str] = &[
    "displayName",
    "formattedAddress",
    "editorialSummary",
    "photos",
    "rating",
    "userRatingCount",
    "types",
    "websiteUri",
    "internationalPhoneNumber",
    "priceLevel",
    "businessStatus",
    "plusCode",
    "currentOpeningHours",
    "accessibilityOptions",
    "reservable",
    "servesCuisine",
    "attributions",
];

/// Structured point-of-interest query
#[derive(Debug, Clone, Serialize)]
pub struct PlacesQuery {
    pub query: String,
    pub radius_meters: u32,
    pub fields: Vec<&'static str>,
}

pub fn build_places_query(state: &TripIntakeState) -> PlacesQuery {
    let mut parts: Vec<String> = Vec::new();

    if let Some(destination) = nonblank(&state.destination) {
        parts.push(format!("things to do in {destination}"));
    } else {
        parts.push("places of interest".to_string());
    }

    if !state.interests.is_empty() {
        parts.push(format!("interested in: {}", state.interests.join(", ")));
    }

    match state.budget {
        Some(Budget::Economy) => parts.push("budget-friendly".to_string()),
        Some(Budget::Luxury) => parts.push("luxury options".to_string()),
        Some(Budget::MidRange) | None => {}
    }

    if let Some(dietary) = nonblank(&state.dietary_needs) {
        parts.push(format!("with {dietary} options"));
    }

    if let Some(accessibility) = nonblank(&state.accessibility_needs) {
        parts.push(format!("{accessibility} friendly"));
    }

    if let Some(age_group) = nonblank(&state.age_group_of_travelers) {
        if let Some(qualifier) = age_group_qualifier(age_group) {
            parts.push(qualifier.to_string());
        }
    }

    match state.how_packed_trip {
        Some(TripPace::Relaxed) => parts.push("relaxed pace activities".to_string()),
        Some(TripPace::Busy) => parts.push("efficient itinerary".to_string()),
        Some(TripPace::Moderate) | None => {}
    }

    if state.ok_with_walking == Some(false) {
        parts.push("minimal walking required".to_string());
    }

    if let Some(trip_type) = state.trip_type {
        parts.push(format!("for a {trip_type} trip"));
    }

    PlacesQuery {
        query: parts.join(", "),
        radius_meters: attractions_radius(state),
        fields: PLACE_FIELDS.to_vec(),
    }
}

/// Shorter stays search a tighter radius around the destination
fn attractions_radius(state: &TripIntakeState) -> u32 {
    match state.dates_of_travel.length_of_stay_days() {
        Some(days) if days <= 3 => SHORT_STAY_RADIUS_METERS,
        Some(days) if days <= 7 => MEDIUM_STAY_RADIUS_METERS,
        Some(_) => LONG_STAY_RADIUS_METERS,
        None => DEFAULT_RADIUS_METERS,
    }
}

fn age_group_qualifier(age_group: &str) -> Option<&'static str> {
    let lowered = age_group.to_lowercase();
    if lowered.contains("family") || lowered.contains("children") {
        Some("family-friendly")
    } else if lowered.contains("adults") || lowered.contains("seniors") {
        Some("suitable for adults/seniors")
    } else if lowered.contains("young") || lowered.contains("solo") {
        Some("good for young adults/solo travelers")
    } else {
        None
    }
}

fn nonblank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{TravelDates, TripType};
    use chrono::NaiveDate;

    fn dates(start: (i32, u32, u32), end: (i32, u32, u32)) -> TravelDates {
        TravelDates {
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2),
        }
    }

    #[test]
    fn test_full_state_assembles_every_clause() {
        let state = TripIntakeState {
            budget: Some(Budget::Economy),
            destination: Some("Paris".to_string()),
            accessibility_needs: Some("wheelchair accessible".to_string()),
            dietary_needs: Some("vegan".to_string()),
            age_group_of_travelers: Some("family with children".to_string()),
            interests: vec!["museums".to_string(), "food".to_string()],
            how_packed_trip: Some(TripPace::Relaxed),
            ok_with_walking: Some(false),
            trip_type: Some(TripType::Family),
            ..TripIntakeState::default()
        };

        let query = build_places_query(&state).query;

        assert_eq!(
            query,
            "things to do in Paris, interested in: museums, food, budget-friendly, \
             with vegan options, wheelchair accessible friendly, family-friendly, \
             relaxed pace activities, minimal walking required, for a family trip"
        );
    }

    #[test]
    fn test_empty_state_yields_generic_query() {
        let query = build_places_query(&TripIntakeState::default());
        assert_eq!(query.query, "places of interest");
        assert_eq!(query.radius_meters, DEFAULT_RADIUS_METERS);
        assert!(!query.fields.is_empty());
    }

    #[test]
    fn test_mid_range_budget_and_moderate_pace_add_nothing() {
        let state = TripIntakeState {
            destination: Some("Rome".to_string()),
            budget: Some(Budget::MidRange),
            how_packed_trip: Some(TripPace::Moderate),
            ok_with_walking: Some(true),
            ..TripIntakeState::default()
        };

        assert_eq!(build_places_query(&state).query, "things to do in Rome");
    }

    #[test]
    fn test_radius_tiers_follow_stay_length() {
        let with_dates = |dates_of_travel| TripIntakeState {
            dates_of_travel,
            ..TripIntakeState::default()
        };

        let short = with_dates(dates((2026, 5, 1), (2026, 5, 3)));
        assert_eq!(build_places_query(&short).radius_meters, 3000);

        let medium = with_dates(dates((2026, 5, 1), (2026, 5, 7)));
        assert_eq!(build_places_query(&medium).radius_meters, 7000);

        let long = with_dates(dates((2026, 5, 1), (2026, 5, 20)));
        assert_eq!(build_places_query(&long).radius_meters, 15_000);
    }

    #[test]
    fn test_age_group_qualifiers() {
        assert_eq!(age_group_qualifier("family of four"), Some("family-friendly"));
        assert_eq!(
            age_group_qualifier("young adults"),
            Some("suitable for adults/seniors")
        );
        assert_eq!(
            age_group_qualifier("solo traveler"),
            Some("good for young adults/solo travelers")
        );
        assert_eq!(age_group_qualifier("mixed"), None);
    }
}
